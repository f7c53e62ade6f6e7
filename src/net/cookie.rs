use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

#[derive(Debug)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub same_site: Option<SameSite>,
    pub http_only: bool,
    pub secure: bool,
}

impl SetCookie {
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        SetCookie {
            name: name.into(),
            value: value.into(),
            expires: None,
            domain: None,
            path: None,
            same_site: None,
            http_only: false,
            secure: false,
        }
    }

    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_domain<D>(mut self, domain: D) -> Self
    where
        D: Into<String>
    {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_path<P>(mut self, path: P) -> Self
    where
        P: Into<String>
    {
        self.path = Some(path.into());
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn into_header_value(self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut writing = format!("{}={}", self.name, self.value);

        if let Some(expires) = self.expires {
            // rfc 7231 IMF-fixdate
            writing.push_str("; Expires=");
            writing.push_str(&expires.format("%a, %d %b %Y %H:%M:%S GMT").to_string());
        }

        if let Some(domain) = self.domain {
            writing.push_str("; Domain=");
            writing.push_str(&domain);
        }

        if let Some(path) = self.path {
            writing.push_str("; Path=");
            writing.push_str(&path);
        }

        if let Some(same_site) = self.same_site {
            writing.push_str("; SameSite=");
            writing.push_str(same_site.as_str());
        }

        if self.http_only {
            writing.push_str("; HttpOnly");
        }

        if self.secure {
            writing.push_str("; Secure");
        }

        HeaderValue::from_str(&writing)
    }
}

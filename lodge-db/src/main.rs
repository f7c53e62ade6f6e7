mod error;
mod args;
mod conn;
mod run;

fn commands() -> clap::Command {
    use clap::{Command, Arg, ArgAction};

    Command::new("lodge-db")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("setup")
                .about("creates the database from scratch")
                .arg(
                    Arg::new("rollback")
                        .long("rollback")
                        .action(ArgAction::SetTrue)
                        .help("rollback changes made to the database")
                )
                .arg(args::db::connect())
                .arg(args::db::user())
                .arg(args::db::password())
                .arg(args::db::req_password())
                .arg(args::db::host())
                .arg(args::db::port())
                .arg(args::db::dbname())
        )
}

fn main() {
    use tokio::runtime::Builder;
    use tracing_subscriber::{FmtSubscriber, EnvFilter};

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("failed to initialize global tracing subscriber");

    let matches = commands().get_matches();

    let rt = match Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .max_blocking_threads(1)
        .build() {
        Ok(rt) => rt,
        Err(err) => panic!("failed to start tokio runtime, {:#}", err)
    };

    if let Err(err) = rt.block_on(exec(&matches)) {
        match err.into_parts() {
            (kind, Some(msg), Some(err)) => {
                println!("{}: {}\n{}", kind, msg, err);
            },
            (kind, Some(msg), None) => {
                println!("{}: {}", kind, msg);
            },
            (kind, None, Some(err)) => {
                println!("{}: {}", kind, err);
            },
            (kind, None, None) => {
                println!("{}", kind);
            }
        }
    }
}

async fn exec(matches: &clap::ArgMatches) -> error::Result<()> {
    match matches.subcommand() {
        Some(("setup", setup_matches)) => run::setup(setup_matches).await?,
        _ => unreachable!()
    };

    Ok(())
}

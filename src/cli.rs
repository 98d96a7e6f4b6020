use std::net::SocketAddr;
use std::process;

use getopts::{Matches, Options};
use tokio::time::Duration;

use crate::server::Source;

const DEFAULT_SOURCE: &str = "events.html";

pub struct Args {
    pub address: SocketAddr,
    pub source: Source,
    pub enable_cache: bool,
    pub cache_ttl: Duration,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag("h", "help", "Show this help and exit");
    opts.optopt(
        "a",
        "address",
        "Where to serve the calendar downloads [Default: 127.0.0.1:8080]",
        "IP:PORT",
    );
    opts.optopt(
        "s",
        "source",
        "Events page to read, an http(s) URL or a local HTML file [Default: events.html]",
        "URL|PATH",
    );
    opts.optflag(
        "c",
        "enable-cache",
        "Keep the parsed events page between requests",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        "How long a cached events page stays fresh [Default: 3600]",
        "SECONDS",
    );
    opts
}

fn exit_with(message: String) -> ! {
    eprintln!("{}: {message}", env!("CARGO_PKG_NAME"));
    process::exit(1);
}

fn opt_or<T>(matches: &Matches, name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    matches
        .opt_get_default(name, default)
        .unwrap_or_else(|err| exit_with(format!("--{name}: {err}")))
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = opts
        .parse(args)
        .unwrap_or_else(|fail| exit_with(fail.to_string()));

    if matches.opt_present("help") {
        let brief = format!(
            "Usage: {} [options]\n\nServes .ics downloads for the events on the club site.",
            env!("CARGO_PKG_NAME")
        );
        println!("{}", opts.usage(&brief));
        process::exit(0);
    }

    let address = opt_or(&matches, "address", SocketAddr::from(([127, 0, 0, 1], 8080)));
    let cache_ttl = Duration::from_secs(opt_or(&matches, "cache-ttl", 3600));

    let source = Source::parse(
        matches
            .opt_str("source")
            .unwrap_or_else(|| DEFAULT_SOURCE.into()),
    );

    Args {
        address,
        source,
        enable_cache: matches.opt_present("enable-cache"),
        cache_ttl,
    }
}

//! CLI arguments for emitting a single record from the shell.

use clap::Parser;
use shadow_rs::formatcp;

use crate::build;

const VERSION_INFO: &str = formatcp!(
    "{}\ncommit_hash: {}\nbuild_time: {}\nbuild_env: {},{}",
    build::PKG_VERSION,
    build::SHORT_COMMIT,
    build::BUILD_TIME,
    build::RUST_VERSION,
    build::RUST_CHANNEL
);

/// CLI arguments. `--json`/`--debug` are combined with `WLOGRUS_JSON`/`WLOGRUS_DEBUG`.
#[derive(Parser, Debug)]
#[command(name = "wlogrus", version = VERSION_INFO, about = "Emit a tagged log record")]
pub struct Args {
    #[arg(help = "Severity: DEBUG, INFO, WARNING, ERROR or FATAL")]
    pub severity: String,
    #[arg(short = 't', long, default_value = "cli", help = "Tag used to group records")]
    pub tag: String,
    #[arg(
        short = 'l',
        long,
        default_value = "",
        help = "Caller location attached to DEBUG/ERROR/FATAL records"
    )]
    pub location: String,
    #[arg(long, help = "Encode the record as JSON")]
    pub json: bool,
    #[arg(long, help = "Emit DEBUG records")]
    pub debug: bool,
    #[arg(required = true, num_args = 1.., help = "Message body")]
    pub body: Vec<String>,
}

impl Args {
    pub fn body_text(&self) -> String {
        self.body.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_severity_tag_and_body() {
        let args = Args::try_parse_from([
            "wlogrus", "error", "--tag", "db", "-l", "db.rs.connect:42", "connection", "refused",
        ])
        .expect("parse args");
        assert_eq!(args.severity, "error");
        assert_eq!(args.tag, "db");
        assert_eq!(args.location, "db.rs.connect:42");
        assert_eq!(args.body_text(), "connection refused");
        assert!(!args.json);
    }

    #[test]
    fn body_is_required() {
        assert!(Args::try_parse_from(["wlogrus", "info"]).is_err());
    }

    #[test]
    fn version_info_spans_multiple_lines() {
        assert!(VERSION_INFO.contains("\ncommit_hash: "));
        assert!(!VERSION_INFO.contains("\\n"));
    }
}

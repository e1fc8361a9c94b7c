use psyche_core::CoreError;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: psyche [--config <path>] [--timeout <secs>] [--json] <username>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub username: String,
    pub config_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub json: bool,
}

impl Args {
    pub fn parse<I>(args: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut username = None;
        let mut config_path = None;
        let mut timeout_secs = None;
        let mut json = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--config" => {
                    let path = args.next().ok_or_else(|| invalid("--config needs a path"))?;
                    config_path = Some(PathBuf::from(path));
                }
                "-t" | "--timeout" => {
                    let raw = args
                        .next()
                        .ok_or_else(|| invalid("--timeout needs a number of seconds"))?;
                    let secs = raw
                        .parse()
                        .map_err(|_| invalid(format!("invalid timeout '{raw}'")))?;
                    timeout_secs = Some(secs);
                }
                "--json" => json = true,
                flag if flag.starts_with('-') => {
                    return Err(invalid(format!("unknown option '{flag}'")));
                }
                name => {
                    if username.replace(name.to_string()).is_some() {
                        return Err(invalid("only one username can be analysed at a time"));
                    }
                }
            }
        }

        let username = username
            .map(|name| name.trim().trim_start_matches("u/").to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| invalid("a username is required"))?;

        Ok(Self {
            username,
            config_path,
            timeout_secs,
            json,
        })
    }
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::InvalidInput {
        message: message.into(),
    }
}

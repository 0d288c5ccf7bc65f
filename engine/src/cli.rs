//! Utility module for command line interfaces

use std::{error::Error, fmt, fmt::Display};

/// An error struct to wrap simple static error messages
#[derive(Debug)]
pub struct CliErr(pub &'static str);

impl Display for CliErr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Error for CliErr {}

/// Split the arguments into positional ones and the values of `--name value` options.
/// Options without a value are ignored.
pub fn split_options(args: impl IntoIterator<Item = String>) -> (Vec<String>, Vec<(String, String)>) {
    let mut positional = Vec::new();
    let mut options = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.strip_prefix("--") {
            Some(name) => {
                if let Some(value) = args.next() {
                    options.push((name.to_string(), value));
                }
            }
            None => positional.push(arg),
        }
    }

    (positional, options)
}

/// Value of the last occurrence of an option.
pub fn option_value<'a>(options: &'a [(String, String)], name: &str) -> Option<&'a str> {
    options.iter().rev().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
}

//! Helpers shared by the generator's test harnesses.
use regex::Regex;

/// Whether any of `args` matches `pattern` at its start.
///
/// Harnesses pass the adapter/device name among their arguments and skip a
/// test when it matches, e.g. `should_skip_test("gpu.*", &["gpu0"])`.
/// Errors only if `pattern` isn't a valid regex.
pub fn should_skip_test<S: AsRef<str>>(pattern: &str, args: &[S]) -> Result<bool, regex::Error> {
    let anchored = Regex::new(&format!("^(?:{pattern})"))?;
    Ok(args.iter().any(|arg| anchored.is_match(arg.as_ref())))
}

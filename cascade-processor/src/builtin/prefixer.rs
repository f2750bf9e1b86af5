use lightningcss::stylesheet::{MinifyOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};

use crate::error::ProcessError;
use crate::processor::{Context, Processor};

/// Adds the vendor-prefixed declarations the configured browsers need.
///
/// Browsers are given as `"<name> <version>"`, e.g. `"safari 8"` or
/// `"ios_saf 12.2"`. When a browser is listed twice the oldest version wins.
#[derive(Debug, Clone, Copy)]
pub struct Prefixer {
    browsers: Browsers,
}

impl Prefixer {
    pub fn from_queries<S: AsRef<str>>(queries: &[S]) -> Result<Self, String> {
        let mut browsers = Browsers::default();
        for query in queries {
            let query = query.as_ref();
            let (name, version) = parse_query(query)?;
            let slot = browser_slot(&mut browsers, name)
                .ok_or_else(|| format!("unknown browser '{name}' in \"{query}\""))?;
            *slot = Some(slot.map_or(version, |current| current.min(version)));
        }
        Ok(Self { browsers })
    }

    pub fn browsers(&self) -> &Browsers {
        &self.browsers
    }
}

impl Processor for Prefixer {
    fn name(&self) -> &str {
        "prefixer"
    }

    fn process(&self, sheet: &mut StyleSheet<'_, '_>, ctx: &mut Context) -> Result<(), ProcessError> {
        ctx.targets = Targets::from(self.browsers);
        sheet
            .minify(MinifyOptions {
                targets: ctx.targets,
                ..MinifyOptions::default()
            })
            .map_err(|e| ProcessError::other(format!("{}: {e}", self.name())))
    }
}

fn parse_query(query: &str) -> Result<(&str, u32), String> {
    let mut parts = query.split_whitespace();
    let (Some(name), Some(version), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected \"<browser> <version>\", got \"{query}\""));
    };
    let version = encode_version(version)
        .ok_or_else(|| format!("invalid version '{version}' in \"{query}\""))?;
    Ok((name, version))
}

/// `major.minor.patch` packed the way lightningcss stores versions.
fn encode_version(version: &str) -> Option<u32> {
    let mut packed = 0u32;
    let mut count = 0;
    for (index, part) in version.split('.').enumerate() {
        if index > 2 {
            return None;
        }
        let value: u32 = part.parse().ok()?;
        if value > 0xff && index > 0 {
            return None;
        }
        packed |= value << (16 - 8 * index as u32);
        count += 1;
    }
    (count > 0).then_some(packed)
}

fn browser_slot<'a>(browsers: &'a mut Browsers, name: &str) -> Option<&'a mut Option<u32>> {
    let slot = match name.to_ascii_lowercase().as_str() {
        "android" => &mut browsers.android,
        "chrome" => &mut browsers.chrome,
        "edge" => &mut browsers.edge,
        "firefox" | "ff" => &mut browsers.firefox,
        "ie" => &mut browsers.ie,
        "ios_saf" | "ios" => &mut browsers.ios_saf,
        "opera" => &mut browsers.opera,
        "safari" => &mut browsers.safari,
        "samsung" => &mut browsers.samsung,
        _ => return None,
    };
    Some(slot)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("8", Some(8 << 16))]
    #[case("12.2", Some((12 << 16) | (2 << 8)))]
    #[case("1.2.3", Some((1 << 16) | (2 << 8) | 3))]
    #[case("1.2.3.4", None)]
    #[case("12.300", None)]
    #[case("x", None)]
    fn versions_are_packed(#[case] version: &str, #[case] expected: Option<u32>) {
        assert_eq!(encode_version(version), expected);
    }

    #[test]
    fn oldest_version_wins() {
        let prefixer = Prefixer::from_queries(&["safari 10", "safari 8", "chrome 49"])
            .expect("queries");
        assert_eq!(prefixer.browsers().safari, Some(8 << 16));
        assert_eq!(prefixer.browsers().chrome, Some(49 << 16));
        assert_eq!(prefixer.browsers().firefox, None);
    }

    #[test]
    fn unknown_browser_is_rejected() {
        let err = Prefixer::from_queries(&["netscape 4"]).expect_err("unknown");
        assert!(err.contains("netscape"));
    }

    #[test]
    fn malformed_query_is_rejected() {
        assert!(Prefixer::from_queries(&["safari"]).is_err());
        assert!(Prefixer::from_queries(&["safari 8 extra"]).is_err());
    }
}

use crate::core::color::{parse_hex, ColorError, Rgb};
use serde::{Deserialize, Serialize};

/// Minimum ratio for normal-size text at level AA
pub const AA_NORMAL_MIN: f64 = 4.5;
/// Minimum ratio for large text (18pt, or 14pt bold) at level AA
pub const AA_LARGE_MIN: f64 = 3.0;
/// Minimum ratio for normal-size text at level AAA
pub const AAA_NORMAL_MIN: f64 = 7.0;
/// Minimum ratio for large text at level AAA
pub const AAA_LARGE_MIN: f64 = 4.5;

/// WCAG conformance target for a text/background pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContrastLevel {
    AaNormal,
    AaLarge,
    AaaNormal,
    AaaLarge,
}

impl ContrastLevel {
    pub const ALL: [ContrastLevel; 4] = [
        ContrastLevel::AaNormal,
        ContrastLevel::AaLarge,
        ContrastLevel::AaaNormal,
        ContrastLevel::AaaLarge,
    ];

    pub fn min_ratio(self) -> f64 {
        match self {
            ContrastLevel::AaNormal => AA_NORMAL_MIN,
            ContrastLevel::AaLarge => AA_LARGE_MIN,
            ContrastLevel::AaaNormal => AAA_NORMAL_MIN,
            ContrastLevel::AaaLarge => AAA_LARGE_MIN,
        }
    }

    pub fn is_met_by(self, ratio: f64) -> bool {
        ratio >= self.min_ratio()
    }
}

impl std::str::FromStr for ContrastLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "aa-normal" | "aa" => Ok(ContrastLevel::AaNormal),
            "aa-large" => Ok(ContrastLevel::AaLarge),
            "aaa-normal" | "aaa" => Ok(ContrastLevel::AaaNormal),
            "aaa-large" => Ok(ContrastLevel::AaaLarge),
            other => Err(format!(
                "unknown contrast level {other:?} (expected aa-normal, aa-large, aaa-normal or aaa-large)"
            )),
        }
    }
}

/// Pass/fail flags for each WCAG threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WcagCompliance {
    pub aa_normal: bool,
    pub aa_large: bool,
    pub aaa_normal: bool,
    pub aaa_large: bool,
}

impl WcagCompliance {
    pub fn from_ratio(ratio: f64) -> Self {
        Self {
            aa_normal: ContrastLevel::AaNormal.is_met_by(ratio),
            aa_large: ContrastLevel::AaLarge.is_met_by(ratio),
            aaa_normal: ContrastLevel::AaaNormal.is_met_by(ratio),
            aaa_large: ContrastLevel::AaaLarge.is_met_by(ratio),
        }
    }

    pub fn meets(&self, level: ContrastLevel) -> bool {
        match level {
            ContrastLevel::AaNormal => self.aa_normal,
            ContrastLevel::AaLarge => self.aa_large,
            ContrastLevel::AaaNormal => self.aaa_normal,
            ContrastLevel::AaaLarge => self.aaa_large,
        }
    }
}

/// Evaluated foreground/background pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    pub foreground: Rgb,
    pub background: Rgb,
    pub ratio: f64,
    pub compliance: WcagCompliance,
}

/// Convert one 8-bit sRGB channel to linear light
#[inline]
pub fn channel_to_linear(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in `[0, 1]`
#[inline]
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * channel_to_linear(color.r)
        + 0.7152 * channel_to_linear(color.g)
        + 0.0722 * channel_to_linear(color.b)
}

/// Contrast ratio between two colours, in `[1, 21]`
///
/// Argument order does not matter.
#[inline]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Round a ratio to two decimals for display
pub fn round_ratio(ratio: f64) -> f64 {
    (ratio * 100.0).round() / 100.0
}

/// Classify an already-parsed pair
pub fn evaluate_pair(foreground: Rgb, background: Rgb) -> ContrastResult {
    let ratio = contrast_ratio(foreground, background);

    ContrastResult {
        foreground,
        background,
        ratio,
        compliance: WcagCompliance::from_ratio(ratio),
    }
}

/// Parse two hex colours and classify them against every WCAG threshold
pub fn evaluate_contrast(foreground: &str, background: &str) -> Result<ContrastResult, ColorError> {
    let fg = parse_hex(foreground)?;
    let bg = parse_hex(background)?;

    Ok(evaluate_pair(fg, bg))
}

/// Evaluate every unordered pair of a palette once
///
/// Fails on the first colour that does not parse.
pub fn palette_matrix<S: AsRef<str>>(colors: &[S]) -> Result<Vec<ContrastResult>, ColorError> {
    let parsed = colors
        .iter()
        .map(|c| parse_hex(c.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut results = Vec::with_capacity(parsed.len() * parsed.len().saturating_sub(1) / 2);
    for (i, a) in parsed.iter().enumerate() {
        for b in &parsed[i + 1..] {
            results.push(evaluate_pair(*a, *b));
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_channel_endpoints() {
        assert_eq!(channel_to_linear(0), 0.0);
        assert!((channel_to_linear(255) - 1.0).abs() < 1e-12);
        // 10/255 is below the 0.03928 knee
        assert!((channel_to_linear(10) - (10.0 / 255.0) / 12.92).abs() < 1e-12);
    }

    #[test]
    fn test_black_on_white() {
        let ratio = contrast_ratio(Rgb::BLACK, Rgb::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9, "got {ratio}");
    }

    #[test]
    fn test_known_grey() {
        // #767676 on white is the classic "just passes AA" grey
        let result = evaluate_contrast("#767676", "#FFFFFF").unwrap();
        assert_eq!(round_ratio(result.ratio), 4.54);
        assert!(result.compliance.aa_normal);
        assert!(!result.compliance.aaa_normal);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let c = WcagCompliance::from_ratio(4.5);
        assert!(c.aa_normal && c.aa_large && c.aaa_large);
        assert!(!c.aaa_normal);

        let c = WcagCompliance::from_ratio(2.99);
        assert!(!c.aa_large);
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("AA".parse::<ContrastLevel>().unwrap(), ContrastLevel::AaNormal);
        assert_eq!("aaa_large".parse::<ContrastLevel>().unwrap(), ContrastLevel::AaaLarge);
        assert!("gold".parse::<ContrastLevel>().is_err());
    }

    #[test]
    fn test_palette_pairs() {
        let results = palette_matrix(&["#000000", "#FFFFFF", "#FF0000"]).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].foreground, Rgb::BLACK);
        assert_eq!(results[0].background, Rgb::WHITE);
    }

    #[test]
    fn test_palette_rejects_bad_entry() {
        let err = palette_matrix(&["#000000", "nope"]).unwrap_err();
        assert_eq!(err, ColorError::InvalidColorFormat("nope".to_string()));
    }
}

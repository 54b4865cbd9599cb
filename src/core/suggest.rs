use crate::core::color::Rgb;
use crate::core::contrast::{contrast_ratio, ContrastLevel};
use serde::{Deserialize, Serialize};

/// Binary search steps over the blend factor; 2^-16 is finer than one channel step
const SEARCH_STEPS: u32 = 16;

/// Proposed replacement for a foreground colour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastSuggestion {
    pub original: Rgb,
    pub suggested: Rgb,
    pub background: Rgb,
    pub ratio: f64,
    pub level: ContrastLevel,
    /// False when even pure black or white cannot reach `level`
    pub achievable: bool,
}

impl ContrastSuggestion {
    pub fn is_unchanged(&self) -> bool {
        self.original == self.suggested
    }
}

/// Find the foreground closest to `foreground` that meets `level` on `background`
///
/// The foreground is darkened toward black and lightened toward white; the
/// smaller of the two blends that reaches the target wins. When neither pole
/// reaches it, the better pole is returned with `achievable = false`.
pub fn suggest_foreground(foreground: Rgb, background: Rgb, level: ContrastLevel) -> ContrastSuggestion {
    let current = contrast_ratio(foreground, background);
    if level.is_met_by(current) {
        return ContrastSuggestion {
            original: foreground,
            suggested: foreground,
            background,
            ratio: current,
            level,
            achievable: true,
        };
    }

    let candidates = [Rgb::BLACK, Rgb::WHITE]
        .into_iter()
        .filter_map(|pole| minimal_blend(foreground, pole, background, level))
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    match candidates {
        Some((_, suggested)) => ContrastSuggestion {
            original: foreground,
            suggested,
            background,
            ratio: contrast_ratio(suggested, background),
            level,
            achievable: true,
        },
        None => {
            let black = contrast_ratio(Rgb::BLACK, background);
            let white = contrast_ratio(Rgb::WHITE, background);
            let (suggested, ratio) = if black >= white {
                (Rgb::BLACK, black)
            } else {
                (Rgb::WHITE, white)
            };

            tracing::debug!(
                "No foreground reaches {:?} on {} (best {:.2})",
                level,
                background,
                ratio
            );

            ContrastSuggestion {
                original: foreground,
                suggested,
                background,
                ratio,
                level,
                achievable: false,
            }
        }
    }
}

/// Smallest blend factor toward `pole` whose colour meets `level`, if any
fn minimal_blend(from: Rgb, pole: Rgb, background: Rgb, level: ContrastLevel) -> Option<(f64, Rgb)> {
    if !level.is_met_by(contrast_ratio(pole, background)) {
        return None;
    }

    // Luminance moves monotonically along the blend, so the predicate is monotone in t
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..SEARCH_STEPS {
        let mid = (lo + hi) / 2.0;
        if level.is_met_by(contrast_ratio(from.mix(pole, mid), background)) {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    // Channel rounding can land just under the threshold; walk forward until it holds
    let mut t = hi;
    let mut color = from.mix(pole, t);
    while !level.is_met_by(contrast_ratio(color, background)) && t < 1.0 {
        t = (t + 1.0 / 255.0).min(1.0);
        color = from.mix(pole, t);
    }

    Some((t, color))
}

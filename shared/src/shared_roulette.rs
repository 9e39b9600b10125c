use serde::{Serialize, Deserialize};
use std::fmt;

// Constants shared by the session and the wheel renderer
pub const SPIN_DURATION_MS: f64 = 4000.0;   // Duration of spin animation in milliseconds
pub const MIN_FULL_ROTATIONS: f64 = 5.0;    // Every spin turns at least this many times
pub const POINTER_ANGLE_DEGREES: f64 = 270.0; // Pointer sits at 12 o'clock, slices start at 3 o'clock
pub const FULL_TURN_DEGREES: f64 = 360.0;

/// Identifier of a reward option. The backend may send numbers or strings,
/// and the claim must echo whichever it sent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum OptionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionId::Number(n) => write!(f, "{}", n),
            OptionId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One slice of the wheel. Slices are drawn in list order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RewardOption {
    pub id: OptionId,
    pub name: String,
    // Accepted on the wire, never used for selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Reward already issued to the caller for a mission set.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MyReward {
    pub status: String,
    pub option_name: String,
}

// === API Types ===

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    pub mission_set_id: String,
    pub option_id: OptionId,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub ok: bool,
    #[serde(default)]
    pub option_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of a single claim, consumed right away to render a message.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimResult {
    Claimed { option_id: OptionId, option_name: String },
    Failed { error: String },
}

/// Rotation baseline carried between spins plus the double-spin guard.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpinState {
    pub current_angle_degrees: f64,
    pub spinning: bool,
}

/// Angles of one spin, all in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub start_angle: f64,
    pub spin_angle: f64,
    pub final_angle: f64,
}

impl SpinPlan {
    /// `fraction` is a uniform draw from `[0, 1)`.
    pub fn new(start_angle: f64, fraction: f64) -> Self {
        let spin_angle = spin_angle(fraction);
        Self {
            start_angle,
            spin_angle,
            final_angle: start_angle + spin_angle,
        }
    }

    /// Wheel rotation at normalized time `t`.
    pub fn display_angle(&self, t: f64) -> f64 {
        display_angle(self.start_angle, self.spin_angle, t)
    }

    pub fn resting_angle(&self) -> f64 {
        normalize_angle(self.final_angle)
    }
}

/// Total rotation for one spin: at least five full turns plus a random extra turn.
pub fn spin_angle(fraction: f64) -> f64 {
    FULL_TURN_DEGREES * MIN_FULL_ROTATIONS + fraction.clamp(0.0, 1.0) * FULL_TURN_DEGREES
}

// Easing function for smooth deceleration: 1 - (1-t)^3
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

pub fn display_angle(start_angle: f64, spin_angle: f64, t: f64) -> f64 {
    start_angle + spin_angle * ease_out_cubic(t)
}

/// Maps any angle into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(FULL_TURN_DEGREES);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= FULL_TURN_DEGREES {
        0.0
    } else {
        normalized
    }
}

pub fn slice_width(option_count: usize) -> Option<f64> {
    if option_count == 0 {
        None
    } else {
        Some(FULL_TURN_DEGREES / option_count as f64)
    }
}

/// Wheel-local bounds `[start, end)` of slice `index`, in degrees clockwise from 3 o'clock.
pub fn slice_bounds(index: usize, option_count: usize) -> Option<(f64, f64)> {
    if index >= option_count {
        return None;
    }
    let width = slice_width(option_count)?;
    Some((index as f64 * width, (index + 1) as f64 * width))
}

/// Index of the slice under the pointer when the wheel rests at `resting_angle`.
///
/// Returns `None` for an empty wheel.
pub fn winner_index(resting_angle: f64, option_count: usize) -> Option<usize> {
    let width = slice_width(option_count)?;
    let adjusted = normalize_angle(POINTER_ANGLE_DEGREES - normalize_angle(resting_angle));
    let index = (adjusted / width).floor() as usize;
    Some(index.min(option_count - 1))
}

/// True when the list carries weights that disagree with uniform selection.
pub fn has_non_uniform_weights(options: &[RewardOption]) -> bool {
    let mut weights = options.iter().map(|o| o.weight);
    let Some(first) = weights.next() else {
        return false;
    };
    weights.any(|w| match (first, w) {
        (Some(a), Some(b)) => (a - b).abs() > f64::EPSILON,
        (None, None) => false,
        _ => true,
    })
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Reads a `my-reward` response. `404` and `204` mean no reward is held.
pub fn parse_my_reward(status: u16, body: &str) -> Result<Option<MyReward>, String> {
    match status {
        404 | 204 => Ok(None),
        _ if is_success(status) => serde_json::from_str::<MyReward>(body)
            .map(Some)
            .map_err(|e| format!("Error parsing reward response: {}", e)),
        _ => Err(format!("Error status: {}", status)),
    }
}

pub fn parse_options(status: u16, body: &str) -> Result<Vec<RewardOption>, String> {
    if !is_success(status) {
        return Err(format!("Error status: {}", status));
    }
    serde_json::from_str(body).map_err(|e| format!("Error parsing options response: {}", e))
}

/// Reads a claim response. Rejections may carry an error status with a regular
/// claim body, which is then taken as the answer.
pub fn parse_claim_response(status: u16, body: &str) -> Result<ClaimResponse, String> {
    match serde_json::from_str::<ClaimResponse>(body) {
        Ok(response) => Ok(response),
        Err(_) if !is_success(status) => Err(format!("Error status: {}", status)),
        Err(e) => Err(format!("Error parsing claim response: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_index_scenarios() {
        assert_eq!(winner_index(0.0, 4), Some(3));
        assert_eq!(winner_index(270.0, 4), Some(0));
        assert_eq!(winner_index(180.0, 4), Some(1));
        assert_eq!(winner_index(90.0, 4), Some(2));
    }

    #[test]
    fn test_winner_index_empty_wheel() {
        assert_eq!(winner_index(123.0, 0), None);
        assert_eq!(slice_width(0), None);
    }

    #[test]
    fn test_winner_index_in_range() {
        for n in 1..=12 {
            let mut angle = 0.0;
            while angle < 360.0 {
                let index = winner_index(angle, n).unwrap();
                assert!(index < n, "angle {} with {} options gave {}", angle, n, index);
                angle += 0.25;
            }
            assert!(winner_index(359.999_999_999, n).unwrap() < n);
        }
    }

    #[test]
    fn test_winner_index_ignores_full_turns() {
        for n in [1, 3, 5, 8] {
            for angle in [0.0, 12.5, 97.0, 270.0, 301.3] {
                let expected = winner_index(angle, n);
                assert_eq!(winner_index(angle + 360.0 * 7.0, n), expected);
                assert_eq!(winner_index(angle - 360.0 * 2.0, n), expected);
            }
        }
    }

    #[test]
    fn test_pointer_lands_inside_winning_slice() {
        // The slice under the pointer in wheel-local terms is at 270 - rotation
        for n in 1..=9 {
            for step in 0..72 {
                let resting = step as f64 * 5.0 + 0.3;
                let index = winner_index(resting, n).unwrap();
                let (start, end) = slice_bounds(index, n).unwrap();
                let local_pointer = normalize_angle(POINTER_ANGLE_DEGREES - resting);
                assert!(local_pointer >= start && local_pointer < end);
            }
        }
    }

    #[test]
    fn test_slice_bounds() {
        assert_eq!(slice_bounds(0, 4), Some((0.0, 90.0)));
        assert_eq!(slice_bounds(3, 4), Some((270.0, 360.0)));
        assert_eq!(slice_bounds(4, 4), None);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(725.0), 5.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert!(normalize_angle(-1e-20) < 360.0);
    }

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        assert_eq!(ease_out_cubic(1.5), 1.0);
    }

    #[test]
    fn test_spin_plan() {
        let plan = SpinPlan::new(100.0, 0.5);
        assert_eq!(plan.spin_angle, 1980.0);
        assert_eq!(plan.final_angle, 2080.0);
        assert_eq!(plan.display_angle(0.0), 100.0);
        assert_eq!(plan.display_angle(1.0), 2080.0);
        assert_eq!(plan.resting_angle(), 280.0);
        assert!(spin_angle(0.0) >= 1800.0);
        assert!(spin_angle(0.999_999) < 2160.0);
    }

    #[test]
    fn test_wire_types() {
        let options: Vec<RewardOption> = serde_json::from_str(
            r#"[{"id": 7, "name": "Coffee Coupon"}, {"id": "gift-2", "name": "Gift Card", "weight": 3}]"#,
        )
        .unwrap();
        assert_eq!(options[0].id, OptionId::Number(7));
        assert_eq!(options[1].id, OptionId::Text("gift-2".to_string()));
        assert_eq!(options[1].weight, Some(3.0));

        let request = ClaimRequest {
            mission_set_id: "42".to_string(),
            option_id: options[0].id.clone(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"missionSetId":"42","optionId":7}"#
        );

        let rejected: ClaimResponse = serde_json::from_str(r#"{"ok": false, "error": "exhausted"}"#).unwrap();
        assert!(!rejected.ok);
        assert_eq!(rejected.error.as_deref(), Some("exhausted"));

        let reward: MyReward = serde_json::from_str(r#"{"status": "ISSUED", "optionName": "Coffee Coupon"}"#).unwrap();
        assert_eq!(reward.option_name, "Coffee Coupon");
    }

    #[test]
    fn test_non_uniform_weights() {
        let option = |weight| RewardOption {
            id: OptionId::Number(1),
            name: "a".to_string(),
            weight,
        };
        assert!(!has_non_uniform_weights(&[option(None), option(None)]));
        assert!(!has_non_uniform_weights(&[option(Some(1.0)), option(Some(1.0))]));
        assert!(has_non_uniform_weights(&[option(Some(1.0)), option(Some(2.0))]));
        assert!(has_non_uniform_weights(&[option(Some(3.0)), option(None)]));
        assert!(has_non_uniform_weights(&[option(None), option(Some(3.0))]));
        assert!(!has_non_uniform_weights(&[]));
    }

    #[test]
    fn test_parse_my_reward() {
        assert_eq!(parse_my_reward(404, "").unwrap(), None);
        assert_eq!(parse_my_reward(204, "").unwrap(), None);

        let held = parse_my_reward(200, r#"{"status": "CLAIMED", "optionName": "Coffee Coupon"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(held.option_name, "Coffee Coupon");

        assert_eq!(parse_my_reward(500, "oops").unwrap_err(), "Error status: 500");
        assert!(parse_my_reward(200, "not json").is_err());
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(200, r#"[{"id": 1, "name": "a"}]"#).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(parse_options(200, "[]").unwrap(), Vec::new());
        assert_eq!(parse_options(503, "").unwrap_err(), "Error status: 503");
    }

    #[test]
    fn test_parse_claim_response() {
        // A rejection with an error status still carries the server's message
        let rejected = parse_claim_response(409, r#"{"ok": false, "error": "Already claimed"}"#).unwrap();
        assert!(!rejected.ok);
        assert_eq!(rejected.error.as_deref(), Some("Already claimed"));

        let claimed = parse_claim_response(200, r#"{"ok": true, "optionName": "Gift Card"}"#).unwrap();
        assert!(claimed.ok);
        assert_eq!(claimed.option_name.as_deref(), Some("Gift Card"));

        assert_eq!(parse_claim_response(502, "<html>").unwrap_err(), "Error status: 502");
        assert!(parse_claim_response(200, "<html>")
            .unwrap_err()
            .starts_with("Error parsing claim response"));
    }
}

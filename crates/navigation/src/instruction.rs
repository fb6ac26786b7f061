//! Human-readable maneuver instructions.

use std::str::FromStr;

use strum::EnumString;

/// Maneuver types with a dedicated phrase. Anything else is humanized as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString)]
pub enum ManeuverKind {
    #[strum(serialize = "turn")]
    Turn,
    #[strum(serialize = "depart")]
    Depart,
    #[strum(serialize = "arrive")]
    Arrive,
    #[strum(serialize = "merge")]
    Merge,
    #[strum(serialize = "on ramp")]
    OnRamp,
    #[strum(serialize = "off ramp")]
    OffRamp,
    #[strum(serialize = "fork")]
    Fork,
    #[strum(serialize = "end of road")]
    EndOfRoad,
    #[strum(serialize = "continue")]
    Continue,
}

/// Build the display instruction for a maneuver.
///
/// `modifier` is lower-cased where the phrase uses it; a non-blank
/// `road_name` is appended verbatim as `" onto {road_name}"`.
pub fn format_instruction(maneuver_type: &str, modifier: &str, road_name: &str) -> String {
    let modifier = modifier.to_lowercase();

    let action = match ManeuverKind::from_str(maneuver_type) {
        Ok(ManeuverKind::Turn) => with_modifier("Turn", &modifier),
        Ok(ManeuverKind::Depart) => "Start".to_owned(),
        Ok(ManeuverKind::Arrive) => "You have arrived".to_owned(),
        Ok(ManeuverKind::Merge) => "Merge".to_owned(),
        Ok(ManeuverKind::OnRamp) => "Take the ramp".to_owned(),
        Ok(ManeuverKind::OffRamp) => "Take the exit".to_owned(),
        Ok(ManeuverKind::Fork) => with_modifier("Keep", &modifier),
        Ok(ManeuverKind::EndOfRoad) => {
            with_modifier("At the end of the road, turn", &modifier)
        }
        Ok(ManeuverKind::Continue) => "Continue".to_owned(),
        Err(_) => humanize(maneuver_type),
    };

    if road_name.trim().is_empty() {
        action
    } else {
        format!("{action} onto {road_name}")
    }
}

fn with_modifier(phrase: &str, modifier: &str) -> String {
    if modifier.is_empty() {
        phrase.to_owned()
    } else {
        format!("{phrase} {modifier}")
    }
}

/// `"new_name"` -> `"New name"`
fn humanize(maneuver_type: &str) -> String {
    let spaced = maneuver_type.replace('_', " ");
    let mut chars = spaced.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

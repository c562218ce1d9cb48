use crate::recommendation::{Category, Priority, Recommendation};

/// Last-resort recommendation set, used when neither rule set produced
/// anything. Generic low-cost measures that apply to nearly any home, so a
/// report always has actionable content.
pub fn default_set() -> Vec<Recommendation> {
    vec![
        Recommendation::new(
            "default/weatherstripping",
            Category::Insulation,
            Priority::Low,
            "Seal doors and windows with weatherstripping",
            "Air sealing around movable joints is the cheapest envelope improvement and typically pays back within two seasons.",
            40.0,
            60.0,
        ),
        Recommendation::new(
            "default/led-bulbs",
            Category::Lighting,
            Priority::Low,
            "Swap remaining incandescent bulbs for LEDs",
            "LED bulbs use about 80% less energy for the same light output and last far longer.",
            50.0,
            80.0,
        ),
        Recommendation::new(
            "default/smart-thermostat",
            Category::SmartHome,
            Priority::Low,
            "Install a smart thermostat",
            "Schedule-aware setbacks typically trim 8-10% from heating and cooling costs without comfort loss.",
            90.0,
            250.0,
        ),
    ]
}

//! Display-unit metadata for aggregate keys, so hosts do not have to
//! re-derive which measurement carries which unit.

/// Returns the display unit for an `average_*` key, or `None` for unitless
/// values (coordinates, the bulletin timestamp, the weather code).
///
/// # Examples
///
/// ```
/// use hungaromet::unit_for;
///
/// assert_eq!(unit_for("average_t"), Some("°C"));
/// assert_eq!(unit_for("average_rau"), Some("mm"));
/// assert_eq!(unit_for("average_sr_mj"), Some("MJ/m²"));
/// assert_eq!(unit_for("average_latitude"), None);
/// ```
pub fn unit_for(key: &str) -> Option<&'static str> {
    match key {
        // Air, soil and water temperatures.
        "average_t" | "average_tn" | "average_tx" | "average_ta" | "average_et5"
        | "average_et10" | "average_et20" | "average_et50" | "average_et100"
        | "average_tsn" | "average_tsn24" | "average_tviz" => Some("°C"),
        // Precipitation, evapotranspiration and their balance.
        "average_rau" | "average_upe" | "average_water_balance" | "average_r" => Some("mm"),
        "average_sr" => Some("J/cm²"),
        "average_sr_mj" => Some("MJ/m²"),
        "average_u" => Some("%"),
        // Wind speeds and directions.
        "average_f" | "average_fs" | "average_fx" => Some("m/s"),
        "average_fd" | "average_fsd" | "average_fxd" => Some("°"),
        // Gamma dose rate.
        "average_sg" => Some("nSv/h"),
        // UV dose.
        "average_suv" => Some("MED"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_units() {
        assert_eq!(unit_for("average_et50"), Some("°C"));
        assert_eq!(unit_for("average_water_balance"), Some("mm"));
        assert_eq!(unit_for("average_fsd"), Some("°"));
        assert_eq!(unit_for("average_sg"), Some("nSv/h"));
    }

    #[test]
    fn unknown_keys_are_unitless() {
        assert_eq!(unit_for("average_elevation"), None);
        assert_eq!(unit_for("weather_code"), None);
    }
}

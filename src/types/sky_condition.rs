//! Defines the `SkyCondition` enum, mapping HungaroMet's numeric weather
//! codes (the hourly bulletin's `we` column) to descriptive variants.

/// Present-weather code reported by HungaroMet synoptic stations.
///
/// The upstream bulletins encode the observed condition as an integer in the
/// `we` column. This enum maps the documented codes to meaningful variants;
/// convert an aggregated code with [`SkyCondition::from_i64`].
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SkyCondition {
    /// Code 1: clear sky ("derült").
    Clear = 1,
    /// Code 2: slightly cloudy ("kissé felhős").
    SlightlyCloudy = 2,
    /// Code 3: moderately cloudy ("közepesen felhős").
    ModeratelyCloudy = 3,
    /// Code 4: mostly cloudy ("erősen felhős").
    MostlyCloudy = 4,
    /// Code 5: overcast ("borult").
    Overcast = 5,
    /// Code 6: veil cloud ("fátyolfelhős").
    VeilCloud = 6,
    /// Code 7: fog ("ködös").
    Fog = 7,
    /// Code 9: clear and hazy ("derült, párás").
    ClearHazy = 9,
    /// Code 10: moderately cloudy and hazy ("közepesen felhős, párás").
    ModeratelyCloudyHazy = 10,
    /// Code 11: overcast and hazy ("borult, párás").
    OvercastHazy = 11,
    /// Code 12: dense veil cloud ("erősen fátyolfelhős").
    DenseVeilCloud = 12,
    /// Code 101: drizzle ("szitálás").
    Drizzle = 101,
    /// Code 102: rain ("eső").
    Rain = 102,
    /// Code 103: rain shower ("zápor").
    RainShower = 103,
    /// Code 104: thunderstorm with rain ("zivatar esővel").
    ThunderstormWithRain = 104,
    /// Code 105: freezing drizzle ("ónos szitálás").
    FreezingDrizzle = 105,
    /// Code 106: freezing rain ("ónos eső").
    FreezingRain = 106,
    /// Code 107: snow flurries ("hószállingózás").
    SnowFlurries = 107,
    /// Code 108: snowfall ("havazás").
    Snowfall = 108,
    /// Code 109: snow shower ("hózápor").
    SnowShower = 109,
    /// Code 110: sleet ("havaseső").
    Sleet = 110,
    /// Code 112: snow thunderstorm ("hózivatar").
    SnowThunderstorm = 112,
    /// Code 202: heavy rain ("erős eső").
    HeavyRain = 202,
    /// Code 203: heavy rain shower ("erős zápor").
    HeavyRainShower = 203,
    /// Code 208: heavy snowfall ("erős havazás").
    HeavySnowfall = 208,
    /// Code 209: heavy snow shower ("erős hózápor").
    HeavySnowShower = 209,
    /// Code 304: thunderstorm with shower ("zivatar záporral").
    ThunderstormWithShower = 304,
    /// Code 310: sleet shower ("havaseső zápor").
    SleetShower = 310,
    /// Code 500: drifting snow ("hófúvás").
    DriftingSnow = 500,
    /// Code 600: hail ("jégeső").
    Hail = 600,
    /// Code 601: thunder ("dörgés").
    Thunder = 601,
}

impl SkyCondition {
    /// Attempts to convert a HungaroMet weather code into a `SkyCondition`.
    ///
    /// Returns `None` for codes outside the documented set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hungaromet::SkyCondition;
    ///
    /// assert_eq!(SkyCondition::from_i64(102), Some(SkyCondition::Rain));
    /// assert_eq!(SkyCondition::from_i64(1), Some(SkyCondition::Clear));
    /// assert_eq!(SkyCondition::from_i64(999), None);
    /// ```
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(SkyCondition::Clear),
            2 => Some(SkyCondition::SlightlyCloudy),
            3 => Some(SkyCondition::ModeratelyCloudy),
            4 => Some(SkyCondition::MostlyCloudy),
            5 => Some(SkyCondition::Overcast),
            6 => Some(SkyCondition::VeilCloud),
            7 => Some(SkyCondition::Fog),
            9 => Some(SkyCondition::ClearHazy),
            10 => Some(SkyCondition::ModeratelyCloudyHazy),
            11 => Some(SkyCondition::OvercastHazy),
            12 => Some(SkyCondition::DenseVeilCloud),
            101 => Some(SkyCondition::Drizzle),
            102 => Some(SkyCondition::Rain),
            103 => Some(SkyCondition::RainShower),
            104 => Some(SkyCondition::ThunderstormWithRain),
            105 => Some(SkyCondition::FreezingDrizzle),
            106 => Some(SkyCondition::FreezingRain),
            107 => Some(SkyCondition::SnowFlurries),
            108 => Some(SkyCondition::Snowfall),
            109 => Some(SkyCondition::SnowShower),
            110 => Some(SkyCondition::Sleet),
            112 => Some(SkyCondition::SnowThunderstorm),
            202 => Some(SkyCondition::HeavyRain),
            203 => Some(SkyCondition::HeavyRainShower),
            208 => Some(SkyCondition::HeavySnowfall),
            209 => Some(SkyCondition::HeavySnowShower),
            304 => Some(SkyCondition::ThunderstormWithShower),
            310 => Some(SkyCondition::SleetShower),
            500 => Some(SkyCondition::DriftingSnow),
            600 => Some(SkyCondition::Hail),
            601 => Some(SkyCondition::Thunder),
            _ => None,
        }
    }
}

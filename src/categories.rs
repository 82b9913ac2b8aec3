use crate::errors::DataError;

/// Day of week as encoded in the dataset: 0 is Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn from_code(code: u8) -> Result<Self, DataError> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| DataError::code("weekday", code))
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Springer,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn from_code(code: u8) -> Result<Self, DataError> {
        match code {
            1 => Ok(Season::Springer),
            2 => Ok(Season::Summer),
            3 => Ok(Season::Fall),
            4 => Ok(Season::Winter),
            other => Err(DataError::code("season", other)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Springer => "Springer",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

/// Weather severity, 1 (best) to 4 (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeatherSituation {
    Clear,
    CloudyFoggy,
    LightRainSnow,
    HeavyRainSnow,
}

impl WeatherSituation {
    pub const ALL: [WeatherSituation; 4] = [
        WeatherSituation::Clear,
        WeatherSituation::CloudyFoggy,
        WeatherSituation::LightRainSnow,
        WeatherSituation::HeavyRainSnow,
    ];

    pub fn from_code(code: u8) -> Result<Self, DataError> {
        match code {
            1 => Ok(WeatherSituation::Clear),
            2 => Ok(WeatherSituation::CloudyFoggy),
            3 => Ok(WeatherSituation::LightRainSnow),
            4 => Ok(WeatherSituation::HeavyRainSnow),
            other => Err(DataError::code("weathersit", other)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeatherSituation::Clear => "Cerah",
            WeatherSituation::CloudyFoggy => "Berawan/Berkabut",
            WeatherSituation::LightRainSnow => "Hujan Ringan/Salju",
            WeatherSituation::HeavyRainSnow => "Hujan Lebat/Salju Besar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemperatureBucket {
    Cold,
    Cool,
    Warm,
    Hot,
}

impl TemperatureBucket {
    pub const ALL: [TemperatureBucket; 4] = [
        TemperatureBucket::Cold,
        TemperatureBucket::Cool,
        TemperatureBucket::Warm,
        TemperatureBucket::Hot,
    ];

    pub fn classify(temp: f64) -> Self {
        if temp < 0.25 {
            TemperatureBucket::Cold
        } else if temp < 0.5 {
            TemperatureBucket::Cool
        } else if temp < 0.75 {
            TemperatureBucket::Warm
        } else {
            TemperatureBucket::Hot
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemperatureBucket::Cold => "Dingin",
            TemperatureBucket::Cool => "Sejuk",
            TemperatureBucket::Warm => "Hangat",
            TemperatureBucket::Hot => "Panas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HumidityBucket {
    Dry,
    Normal,
    Humid,
}

impl HumidityBucket {
    pub const ALL: [HumidityBucket; 3] = [
        HumidityBucket::Dry,
        HumidityBucket::Normal,
        HumidityBucket::Humid,
    ];

    pub fn classify(hum: f64) -> Self {
        if hum < 0.3 {
            HumidityBucket::Dry
        } else if hum < 0.7 {
            HumidityBucket::Normal
        } else {
            HumidityBucket::Humid
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HumidityBucket::Dry => "Kering",
            HumidityBucket::Normal => "Normal",
            HumidityBucket::Humid => "Lembap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WindBucket {
    Calm,
    Moderate,
    Strong,
}

impl WindBucket {
    pub const ALL: [WindBucket; 3] = [WindBucket::Calm, WindBucket::Moderate, WindBucket::Strong];

    pub fn classify(windspeed: f64) -> Self {
        if windspeed < 0.3 {
            WindBucket::Calm
        } else if windspeed < 0.6 {
            WindBucket::Moderate
        } else {
            WindBucket::Strong
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WindBucket::Calm => "Tenang",
            WindBucket::Moderate => "Sedang",
            WindBucket::Strong => "Kencang",
        }
    }
}

/// Buckets derived once per daily record at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCategories {
    pub temperature: TemperatureBucket,
    pub humidity: HumidityBucket,
    pub wind: WindBucket,
    pub weather: WeatherSituation,
}

impl DayCategories {
    #[cfg(test)]
    pub fn labels(&self) -> (&'static str, &'static str, &'static str, &'static str) {
        (
            self.temperature.label(),
            self.humidity.label(),
            self.wind.label(),
            self.weather.label(),
        )
    }
}

/// Classifies one day's conditions. Fails only on an unknown weather code.
pub fn categorize_day(
    temp: f64,
    hum: f64,
    windspeed: f64,
    weathersit: u8,
) -> Result<DayCategories, DataError> {
    Ok(DayCategories {
        temperature: TemperatureBucket::classify(temp),
        humidity: HumidityBucket::classify(hum),
        wind: WindBucket::classify(windspeed),
        weather: WeatherSituation::from_code(weathersit)?,
    })
}

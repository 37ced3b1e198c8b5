use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

/// Number of value slots carried by every [`Sample`]
pub const CHANNEL_COUNT: usize = 6;

/// Vehicle signals a sample can carry
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChannelId {
    Speed,
    Rpm,
    Throttle,
    CoolantTemp,
    OilPressure,
    BatteryVoltage,
}

impl ChannelId {
    /// Slot of this channel inside a sample
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn unit(self) -> &'static str {
        match self {
            ChannelId::Speed => "km/h",
            ChannelId::Rpm => "RPM",
            ChannelId::Throttle => "%",
            ChannelId::CoolantTemp => "°C",
            ChannelId::OilPressure => "kPa",
            ChannelId::BatteryVoltage => "V",
        }
    }

    /// Human-readable name for legends and reports
    pub fn display_name(self) -> &'static str {
        match self {
            ChannelId::Speed => "Speed",
            ChannelId::Rpm => "Engine Speed",
            ChannelId::Throttle => "Throttle Position",
            ChannelId::CoolantTemp => "Coolant Temperature",
            ChannelId::OilPressure => "Oil Pressure",
            ChannelId::BatteryVoltage => "Battery Voltage",
        }
    }
}

/// One time-stamped record of every channel.
///
/// A slot holding `None` marks sensor dropout. Missing values are never
/// treated as zero by anything in this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the start of the recording
    pub timestamp: f64,
    values: [Option<f64>; CHANNEL_COUNT],
}

impl Sample {
    /// Create a sample with every channel missing
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
            values: [None; CHANNEL_COUNT],
        }
    }

    /// Builder-style setter
    pub fn with(mut self, channel: ChannelId, value: f64) -> Self {
        self.values[channel.index()] = Some(value);
        self
    }

    pub fn set(&mut self, channel: ChannelId, value: Option<f64>) {
        self.values[channel.index()] = value;
    }

    /// Value of a channel, or `None` when it is missing.
    ///
    /// Non-finite values are reported as missing so NaN or infinities that
    /// slip in from a data source never reach the aggregations.
    #[inline]
    pub fn get(&self, channel: ChannelId) -> Option<f64> {
        self.values[channel.index()].filter(|v| v.is_finite())
    }

    /// Stored slot without the finiteness filter
    pub fn raw(&self, channel: ChannelId) -> Option<f64> {
        self.values[channel.index()]
    }
}

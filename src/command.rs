use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    dlive::{
        DLIVE_MAX_VALUE,
        convert::fader_level_label,
        topology::{ChannelType, SocketType},
    },
    error::AppError,
};

/// Closed set of named values selectable from the console.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn name(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.name()).collect()
    }
}

impl Choice for ChannelType {
    const ALL: &'static [Self] = &ChannelType::ALL;

    fn name(&self) -> &'static str {
        ChannelType::name(self)
    }
}

impl Choice for SocketType {
    const ALL: &'static [Self] = &SocketType::ALL;

    fn name(&self) -> &'static str {
        SocketType::name(self)
    }
}

// Addresses ////////////////////////////////////////////////////////////////

/// A channel of a given type; the number is 0-based and below the type's count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRef {
    channel_type: ChannelType,
    number: u8,
}

impl ChannelRef {
    pub fn new(channel_type: ChannelType, number: u8) -> Result<Self, AppError> {
        if number >= channel_type.count() {
            return Err(AppError::invalid_parameter(format!(
                "{} {} out of range (1-{})",
                channel_type.label(),
                number as u16 + 1,
                channel_type.count()
            )));
        }
        Ok(Self {
            channel_type,
            number,
        })
    }

    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn note(&self) -> u8 {
        self.channel_type.offsets().note + self.number
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.channel_type, self.number as u16 + 1)
    }
}

/// A preamp socket; the number is 0-based within its bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketRef {
    socket_type: SocketType,
    number: u8,
}

impl SocketRef {
    pub fn new(socket_type: SocketType, number: u8) -> Result<Self, AppError> {
        if number >= socket_type.count() {
            return Err(AppError::invalid_parameter(format!(
                "{} socket {} out of range (1-{})",
                socket_type.label(),
                number as u16 + 1,
                socket_type.count()
            )));
        }
        Ok(Self {
            socket_type,
            number,
        })
    }

    pub fn note(&self) -> u8 {
        self.socket_type.note_offset() + self.number
    }
}

impl fmt::Display for SocketRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.socket_type, self.number as u16 + 1)
    }
}

// Choices //////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ChannelColour {
    Off = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Purple = 5,
    LightBlue = 6,
    White = 7,
}

impl Choice for ChannelColour {
    const ALL: &'static [Self] = &[
        ChannelColour::Off,
        ChannelColour::Red,
        ChannelColour::Green,
        ChannelColour::Yellow,
        ChannelColour::Blue,
        ChannelColour::Purple,
        ChannelColour::LightBlue,
        ChannelColour::White,
    ];

    fn name(&self) -> &'static str {
        match self {
            ChannelColour::Off => "off",
            ChannelColour::Red => "red",
            ChannelColour::Green => "green",
            ChannelColour::Yellow => "yellow",
            ChannelColour::Blue => "blue",
            ChannelColour::Purple => "purple",
            ChannelColour::LightBlue => "light_blue",
            ChannelColour::White => "white",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum EqType {
    Bell = 0,
    LowShelf = 1,
    HighShelf = 2,
    LowPass = 3,
    HighPass = 4,
}

impl Choice for EqType {
    const ALL: &'static [Self] = &[
        EqType::Bell,
        EqType::LowShelf,
        EqType::HighShelf,
        EqType::LowPass,
        EqType::HighPass,
    ];

    fn name(&self) -> &'static str {
        match self {
            EqType::Bell => "bell",
            EqType::LowShelf => "low_shelf",
            EqType::HighShelf => "high_shelf",
            EqType::LowPass => "low_pass",
            EqType::HighPass => "high_pass",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum EqBand {
    Band1 = 0,
    Band2 = 1,
    Band3 = 2,
    Band4 = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum UfxKey {
    C = 0,
    CSharp = 1,
    D = 2,
    DSharp = 3,
    E = 4,
    F = 5,
    FSharp = 6,
    G = 7,
    GSharp = 8,
    A = 9,
    ASharp = 10,
    B = 11,
}

impl Choice for UfxKey {
    const ALL: &'static [Self] = &[
        UfxKey::C,
        UfxKey::CSharp,
        UfxKey::D,
        UfxKey::DSharp,
        UfxKey::E,
        UfxKey::F,
        UfxKey::FSharp,
        UfxKey::G,
        UfxKey::GSharp,
        UfxKey::A,
        UfxKey::ASharp,
        UfxKey::B,
    ];

    fn name(&self) -> &'static str {
        match self {
            UfxKey::C => "C",
            UfxKey::CSharp => "C#",
            UfxKey::D => "D",
            UfxKey::DSharp => "D#",
            UfxKey::E => "E",
            UfxKey::F => "F",
            UfxKey::FSharp => "F#",
            UfxKey::G => "G",
            UfxKey::GSharp => "G#",
            UfxKey::A => "A",
            UfxKey::ASharp => "A#",
            UfxKey::B => "B",
        }
    }
}

/// Scale of the global UFX key
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum UfxScale {
    Major = 0,
    Minor = 1,
}

impl Choice for UfxScale {
    const ALL: &'static [Self] = &[UfxScale::Major, UfxScale::Minor];

    fn name(&self) -> &'static str {
        match self {
            UfxScale::Major => "major",
            UfxScale::Minor => "minor",
        }
    }
}

/// Scale parameter of a single UFX unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UfxUnitScale {
    Major,
    Minor,
    Chromatic,
}

impl Choice for UfxUnitScale {
    const ALL: &'static [Self] = &[
        UfxUnitScale::Major,
        UfxUnitScale::Minor,
        UfxUnitScale::Chromatic,
    ];

    fn name(&self) -> &'static str {
        match self {
            UfxUnitScale::Major => "major",
            UfxUnitScale::Minor => "minor",
            UfxUnitScale::Chromatic => "chromatic",
        }
    }
}

// Commands /////////////////////////////////////////////////////////////////

/// One mixer operation with the parameters it needs, already range checked.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Mute {
        channel: ChannelRef,
        on: bool,
    },
    FaderLevel {
        channel: ChannelRef,
        level: u8,
    },
    AssignMainMix {
        channel: ChannelRef,
        on: bool,
    },
    SendLevel {
        source: ChannelRef,
        destination: ChannelRef,
        level: u8,
    },
    InputToGroupAux {
        source: ChannelRef,
        destination: ChannelRef,
    },
    DcaAssign {
        channel: ChannelRef,
        dca: u8,
        on: bool,
    },
    MuteGroupAssign {
        channel: ChannelRef,
        mute_group: u8,
        on: bool,
    },
    PreampGain {
        socket: SocketRef,
        gain_db: f64,
    },
    PreampPad {
        socket: SocketRef,
        on: bool,
    },
    Preamp48v {
        socket: SocketRef,
        on: bool,
    },
    ChannelName {
        channel: ChannelRef,
        name: String,
    },
    ChannelColour {
        channel: ChannelRef,
        colour: ChannelColour,
    },
    SceneRecall {
        scene: u16,
    },
    CueListRecall {
        cue_list: u16,
    },
    GoNextPrevious {
        controller: u8,
        value: u8,
    },
    ParametricEq {
        channel: ChannelRef,
        band: EqBand,
        eq_type: EqType,
        frequency_hz: f64,
        width: f64,
        gain_db: f64,
    },
    HpfFrequency {
        channel: ChannelRef,
        frequency_hz: f64,
    },
    HpfOnOff {
        channel: ChannelRef,
        on: bool,
    },
    UfxGlobalKey {
        key: UfxKey,
    },
    UfxGlobalScale {
        scale: UfxScale,
    },
    // midi_channel is 1-based as shown on the UFX unit
    UfxUnitParameter {
        midi_channel: u8,
        controller: u8,
        value: u8,
    },
    UfxUnitKey {
        midi_channel: u8,
        controller: u8,
        key: UfxKey,
    },
    UfxUnitScale {
        midi_channel: u8,
        controller: u8,
        scale: UfxUnitScale,
    },
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Mute { channel, on } => write!(f, "mute {}: {}", channel, on_off(*on)),
            Command::FaderLevel { channel, level } => {
                write!(f, "fader-level {}: {}", channel, fader_level_label(*level))
            }
            Command::AssignMainMix { channel, on } => {
                write!(f, "assign-main-mix {}: {}", channel, on_off(*on))
            }
            Command::SendLevel {
                source,
                destination,
                level,
            } => write!(f, "send-level {} -> {}: {}", source, destination, level),
            Command::InputToGroupAux {
                source,
                destination,
            } => write!(f, "input-to-group-aux {} -> {}", source, destination),
            Command::DcaAssign { channel, dca, on } => {
                write!(f, "dca-assign {} dca {}: {}", channel, *dca as u16 + 1, on_off(*on))
            }
            Command::MuteGroupAssign {
                channel,
                mute_group,
                on,
            } => write!(
                f,
                "mute-group-assign {} mute group {}: {}",
                channel,
                *mute_group as u16 + 1,
                on_off(*on)
            ),
            Command::PreampGain { socket, gain_db } => {
                write!(f, "preamp-gain {}: {:.1} dB", socket, gain_db)
            }
            Command::PreampPad { socket, on } => write!(f, "preamp-pad {}: {}", socket, on_off(*on)),
            Command::Preamp48v { socket, on } => write!(f, "preamp-48v {}: {}", socket, on_off(*on)),
            Command::ChannelName { channel, name } => {
                write!(f, "channel-name {}: \"{}\"", channel, name)
            }
            Command::ChannelColour { channel, colour } => {
                write!(f, "channel-colour {}: {}", channel, colour.name())
            }
            Command::SceneRecall { scene } => write!(f, "scene-recall {}", *scene as u32 + 1),
            Command::CueListRecall { cue_list } => {
                write!(f, "cue-list-recall {}", *cue_list as u32 + 1)
            }
            Command::GoNextPrevious { controller, value } => {
                write!(f, "go-next-previous cc {}: {}", controller, value)
            }
            Command::ParametricEq {
                channel,
                band,
                eq_type,
                frequency_hz,
                width,
                gain_db,
            } => write!(
                f,
                "parametric-eq {} band {}: {} {:.0} Hz width {:.2} {:+.1} dB",
                channel,
                u8::from(*band) + 1,
                eq_type.name(),
                frequency_hz,
                width,
                gain_db
            ),
            Command::HpfFrequency {
                channel,
                frequency_hz,
            } => write!(f, "hpf-frequency {}: {:.0} Hz", channel, frequency_hz),
            Command::HpfOnOff { channel, on } => write!(f, "hpf-on-off {}: {}", channel, on_off(*on)),
            Command::UfxGlobalKey { key } => write!(f, "ufx-global-key {}", key.name()),
            Command::UfxGlobalScale { scale } => write!(f, "ufx-global-scale {}", scale.name()),
            Command::UfxUnitParameter {
                midi_channel,
                controller,
                value,
            } => write!(
                f,
                "ufx-unit-parameter ch {} cc {}: {}",
                midi_channel, controller, value
            ),
            Command::UfxUnitKey {
                midi_channel,
                controller,
                key,
            } => write!(
                f,
                "ufx-unit-key ch {} cc {}: {}",
                midi_channel,
                controller,
                key.name()
            ),
            Command::UfxUnitScale {
                midi_channel,
                controller,
                scale,
            } => write!(
                f,
                "ufx-unit-scale ch {} cc {}: {}",
                midi_channel,
                controller,
                scale.name()
            ),
        }
    }
}

/// Rejects anything above 127.
pub fn check_seven_bits(name: &str, value: u8) -> Result<u8, AppError> {
    if value > DLIVE_MAX_VALUE {
        return Err(AppError::invalid_parameter(format!(
            "{} {} out of range (0-127)",
            name, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;

    #[test]
    fn test_channel_ref_range() {
        assert!(ChannelRef::new(ChannelType::Input, 127).is_ok());
        let Err(e) = ChannelRef::new(ChannelType::Input, 128) else {
            panic!();
        };
        assert_eq!(e.error_type, ErrorType::InvalidParameter);
        assert!(ChannelRef::new(ChannelType::Main, 5).is_ok());
        assert!(ChannelRef::new(ChannelType::Main, 6).is_err());
    }

    #[test]
    fn test_channel_ref_note() {
        let Ok(channel) = ChannelRef::new(ChannelType::StereoGroup, 2) else {
            panic!();
        };
        assert_eq!(channel.note(), 0x42);
        assert_eq!(channel.to_string(), "stereo_group 3");
    }

    #[test]
    fn test_socket_ref() {
        let Ok(socket) = SocketRef::new(SocketType::MixrackDx3To4, 31) else {
            panic!();
        };
        assert_eq!(socket.note(), 0x7F);
        assert!(SocketRef::new(SocketType::MixrackDx1To2, 32).is_err());
    }

    #[test]
    fn test_choice_names() {
        assert_eq!(ChannelColour::from_name("light_blue"), Some(ChannelColour::LightBlue));
        assert_eq!(u8::from(ChannelColour::White), 7);
        assert_eq!(UfxKey::from_name("F#"), Some(UfxKey::FSharp));
        assert_eq!(UfxUnitScale::from_name("chromatic"), Some(UfxUnitScale::Chromatic));
        assert_eq!(<ChannelType as Choice>::from_name("dca"), Some(ChannelType::Dca));
        assert_eq!(EqType::from_name("shelf"), None);
        assert_eq!(UfxScale::names(), vec!["major", "minor"]);
        assert_eq!(EqBand::try_from(3u8).ok(), Some(EqBand::Band4));
        assert!(EqBand::try_from(4u8).is_err());
    }

    #[test]
    fn test_display() {
        let Ok(channel) = ChannelRef::new(ChannelType::Input, 0) else {
            panic!();
        };
        let command = Command::FaderLevel {
            channel,
            level: 107,
        };
        assert_eq!(command.to_string(), "fader-level input 1: 0.0 dB");
        let command = Command::SceneRecall { scene: 0 };
        assert_eq!(command.to_string(), "scene-recall 1");
    }

    #[test]
    fn test_check_seven_bits() {
        assert_eq!(check_seven_bits("level", 127).ok(), Some(127));
        assert!(check_seven_bits("level", 128).is_err());
    }
}

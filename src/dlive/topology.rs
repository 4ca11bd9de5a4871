use std::fmt;

/// Addressable channel families of the mixrack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    Input,
    MonoGroup,
    StereoGroup,
    MonoAux,
    StereoAux,
    MonoMatrix,
    StereoMatrix,
    MonoFxSend,
    StereoFxSend,
    FxReturn,
    Main,
    MuteGroup,
    Dca,
    StereoUfxSend,
    StereoUfxReturn,
}

/// Where a channel family lives in MIDI space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiOffsets {
    pub channel: u8,
    pub note: u8,
}

impl ChannelType {
    pub const ALL: [ChannelType; 15] = [
        ChannelType::Input,
        ChannelType::MonoGroup,
        ChannelType::StereoGroup,
        ChannelType::MonoAux,
        ChannelType::StereoAux,
        ChannelType::MonoMatrix,
        ChannelType::StereoMatrix,
        ChannelType::MonoFxSend,
        ChannelType::StereoFxSend,
        ChannelType::FxReturn,
        ChannelType::Main,
        ChannelType::MuteGroup,
        ChannelType::Dca,
        ChannelType::StereoUfxSend,
        ChannelType::StereoUfxReturn,
    ];

    /// Types carrying audio; everything except the DCA and mute group controllers.
    pub const AUDIO_PATHS: [ChannelType; 13] = [
        ChannelType::Input,
        ChannelType::MonoGroup,
        ChannelType::StereoGroup,
        ChannelType::MonoAux,
        ChannelType::StereoAux,
        ChannelType::MonoMatrix,
        ChannelType::StereoMatrix,
        ChannelType::MonoFxSend,
        ChannelType::StereoFxSend,
        ChannelType::FxReturn,
        ChannelType::Main,
        ChannelType::StereoUfxSend,
        ChannelType::StereoUfxReturn,
    ];

    pub fn offsets(&self) -> MidiOffsets {
        let (channel, note) = match self {
            ChannelType::Input => (0, 0x00),
            ChannelType::MonoGroup => (1, 0x00),
            ChannelType::StereoGroup => (1, 0x40),
            ChannelType::MonoAux => (2, 0x00),
            ChannelType::StereoAux => (2, 0x40),
            ChannelType::MonoMatrix => (3, 0x00),
            ChannelType::StereoMatrix => (3, 0x40),
            ChannelType::MonoFxSend => (4, 0x00),
            ChannelType::StereoFxSend => (4, 0x10),
            ChannelType::FxReturn => (4, 0x20),
            ChannelType::Main => (4, 0x30),
            ChannelType::Dca => (4, 0x36),
            ChannelType::MuteGroup => (4, 0x4E),
            ChannelType::StereoUfxSend => (4, 0x56),
            ChannelType::StereoUfxReturn => (4, 0x5E),
        };
        return MidiOffsets { channel, note };
    }

    pub fn count(&self) -> u8 {
        match self {
            ChannelType::Input => 128,
            ChannelType::MonoGroup => 62,
            ChannelType::StereoGroup => 31,
            ChannelType::MonoAux => 62,
            ChannelType::StereoAux => 32,
            ChannelType::MonoMatrix => 62,
            ChannelType::StereoMatrix => 31,
            ChannelType::MonoFxSend => 16,
            ChannelType::StereoFxSend => 16,
            ChannelType::FxReturn => 16,
            ChannelType::Main => 6,
            ChannelType::Dca => 24,
            ChannelType::MuteGroup => 8,
            ChannelType::StereoUfxSend => 8,
            ChannelType::StereoUfxReturn => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChannelType::Input => "input",
            ChannelType::MonoGroup => "mono_group",
            ChannelType::StereoGroup => "stereo_group",
            ChannelType::MonoAux => "mono_aux",
            ChannelType::StereoAux => "stereo_aux",
            ChannelType::MonoMatrix => "mono_matrix",
            ChannelType::StereoMatrix => "stereo_matrix",
            ChannelType::MonoFxSend => "mono_fx_send",
            ChannelType::StereoFxSend => "stereo_fx_send",
            ChannelType::FxReturn => "fx_return",
            ChannelType::Main => "main",
            ChannelType::Dca => "dca",
            ChannelType::MuteGroup => "mute_group",
            ChannelType::StereoUfxSend => "stereo_ufx_send",
            ChannelType::StereoUfxReturn => "stereo_ufx_return",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChannelType::Input => "Input",
            ChannelType::MonoGroup => "Mono Group",
            ChannelType::StereoGroup => "Stereo Group",
            ChannelType::MonoAux => "Mono Aux",
            ChannelType::StereoAux => "Stereo Aux",
            ChannelType::MonoMatrix => "Mono Matrix",
            ChannelType::StereoMatrix => "Stereo Matrix",
            ChannelType::MonoFxSend => "Mono FX Send",
            ChannelType::StereoFxSend => "Stereo FX Send",
            ChannelType::FxReturn => "FX Return",
            ChannelType::Main => "Main",
            ChannelType::Dca => "DCA",
            ChannelType::MuteGroup => "Mute Group",
            ChannelType::StereoUfxSend => "Stereo UFX Send",
            ChannelType::StereoUfxReturn => "Stereo UFX Return",
        }
    }

    pub fn from_name(name: &str) -> Option<ChannelType> {
        ChannelType::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Preamp socket banks of the mixrack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketType {
    MixrackSockets1To64,
    MixrackDx1To2,
    MixrackDx3To4,
}

impl SocketType {
    pub const ALL: [SocketType; 3] = [
        SocketType::MixrackSockets1To64,
        SocketType::MixrackDx1To2,
        SocketType::MixrackDx3To4,
    ];

    pub fn note_offset(&self) -> u8 {
        match self {
            SocketType::MixrackSockets1To64 => 0x00,
            SocketType::MixrackDx1To2 => 0x40,
            SocketType::MixrackDx3To4 => 0x60,
        }
    }

    pub fn count(&self) -> u8 {
        match self {
            SocketType::MixrackSockets1To64 => 64,
            SocketType::MixrackDx1To2 => 32,
            SocketType::MixrackDx3To4 => 32,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SocketType::MixrackSockets1To64 => "mixrack_sockets_1_to_64",
            SocketType::MixrackDx1To2 => "mixrack_dx_1_to_2",
            SocketType::MixrackDx3To4 => "mixrack_dx_3_to_4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SocketType::MixrackSockets1To64 => "Mixrack sockets 1-64",
            SocketType::MixrackDx1To2 => "MixRack DX 1/2",
            SocketType::MixrackDx3To4 => "MixRack DX 3/4",
        }
    }

    pub fn from_name(name: &str) -> Option<SocketType> {
        SocketType::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Human label of the five MIDI channels used from a 0-based base channel, e.g. "1 to 5".
pub fn midi_channel_span_label(base_channel: u8) -> String {
    let first = base_channel as u16 + 1;
    return format!("{} to {}", first, first + 4);
}

pub mod convert;
pub mod topology;

// Frame layout /////////////////////////////////

pub const DLIVE_SYSEX_HEADER: [u8; 8] = [0xF0, 0x00, 0x00, 0x1A, 0x50, 0x10, 0x01, 0x00];
pub const DLIVE_SYSEX_END: u8 = 0xF7;

/* Status bytes, the base MIDI channel and channel offset are added */
pub const DLIVE_STATUS_NOTE_ON: u8 = 0x90;
pub const DLIVE_STATUS_CONTROL_CHANGE: u8 = 0xB0;
pub const DLIVE_STATUS_PROGRAM_CHANGE: u8 = 0xC0;
pub const DLIVE_STATUS_PITCH_BEND: u8 = 0xE0;

/* NRPN controller numbers */
pub const DLIVE_CC_NRPN_MSB: u8 = 0x63;
pub const DLIVE_CC_NRPN_LSB: u8 = 0x62;
pub const DLIVE_CC_DATA_ENTRY: u8 = 0x06;
pub const DLIVE_CC_BANK_SELECT: u8 = 0x00;

// Parameter IDs ////////////////////////////////

pub const DLIVE_PARAM_FADER: u8 = 0x17;
pub const DLIVE_PARAM_MAIN_MIX: u8 = 0x18;
pub const DLIVE_PARAM_EQ_BASE: u8 = 0x1A;
pub const DLIVE_PARAM_HPF_FREQUENCY: u8 = 0x30;
pub const DLIVE_PARAM_HPF_ON_OFF: u8 = 0x31;
pub const DLIVE_PARAM_ROUTING: u8 = 0x40;

/* Routing values for DLIVE_PARAM_ROUTING */
pub const DLIVE_ROUTING_DCA_ON: u8 = 0x40;
pub const DLIVE_ROUTING_DCA_OFF: u8 = 0x00;
pub const DLIVE_ROUTING_MUTE_GROUP_ON: u8 = 0x58;
pub const DLIVE_ROUTING_MUTE_GROUP_OFF: u8 = 0x18;

// SysEx opcodes ////////////////////////////////

pub const DLIVE_SYSEX_NAME: u8 = 0x03;
pub const DLIVE_SYSEX_COLOUR: u8 = 0x06;
pub const DLIVE_SYSEX_PREAMP_PAD: u8 = 0x09;
pub const DLIVE_SYSEX_PREAMP_48V: u8 = 0x0C;
pub const DLIVE_SYSEX_SEND_LEVEL: u8 = 0x0D;
pub const DLIVE_SYSEX_INPUT_TO_GROUP_AUX: u8 = 0x0E;

// Values ///////////////////////////////////////

pub const DLIVE_VALUE_ON: u8 = 0x7F;
pub const DLIVE_VALUE_OFF: u8 = 0x3F;
pub const DLIVE_FLAG_ON: u8 = 0x40;
pub const DLIVE_FLAG_OFF: u8 = 0x00;
pub const DLIVE_MAX_VALUE: u8 = 0x7F;

/* UFX global controllers */
pub const DLIVE_CC_UFX_KEY: u8 = 0x0C;
pub const DLIVE_CC_UFX_SCALE: u8 = 0x0D;

// Ranges ///////////////////////////////////////

pub const DLIVE_SCENE_COUNT: u16 = 500;
pub const DLIVE_CUE_LIST_COUNT: u16 = 1999;
pub const DLIVE_BANK_SIZE: u16 = 128;
pub const DLIVE_MAX_CUE_LIST_BANK: u8 = 15;

/// Highest usable base MIDI channel; the console occupies five consecutive channels.
pub const DLIVE_MAX_BASE_CHANNEL: u8 = 11;

use lazy_static::lazy_static;

use crate::{
    command::{
        ChannelColour, ChannelRef, Choice, Command, EqBand, EqType, SocketRef, UfxKey, UfxScale,
        UfxUnitScale, check_seven_bits,
    },
    dlive::{
        DLIVE_CUE_LIST_COUNT, DLIVE_SCENE_COUNT,
        convert::{
            EQ_GAIN_MAX_DB, EQ_GAIN_MIN_DB, EQ_WIDTH_MAX, EQ_WIDTH_MIN, PREAMP_GAIN_MAX_DB,
            PREAMP_GAIN_MIN_DB,
        },
        topology::{ChannelType, SocketType},
    },
    error::AppError,
    user_session::spec::{Spec, Value},
};

type Result<T> = std::result::Result<T, AppError>;

pub const EQ_FREQUENCY_MIN_HZ: f64 = 20.0;
pub const EQ_FREQUENCY_MAX_HZ: f64 = 20000.0;
pub const HPF_FREQUENCY_MIN_HZ: f64 = 20.0;
pub const HPF_FREQUENCY_MAX_HZ: f64 = 2000.0;

/// One user-invocable operation: its parameters and how they become a command.
pub struct ActionDef {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<Spec>,
    pub build: fn(&[Value]) -> Result<Command>,
}

impl ActionDef {
    pub fn usage(&self) -> String {
        let mut out = self.name.to_string();
        for spec in &self.params {
            if spec.required {
                out += format!(" <{}>", spec.name).as_str();
            } else {
                out += format!(" [{}]", spec.name).as_str();
            }
        }
        return out;
    }
}

// Channel families accepted by each action

const ANY_CHANNEL: &[ChannelType] = &ChannelType::ALL;
const AUDIO_PATHS: &[ChannelType] = &ChannelType::AUDIO_PATHS;
const FADER_CHANNELS: &[ChannelType] = &[
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
    ChannelType::Dca,
    ChannelType::StereoUfxSend,
    ChannelType::StereoUfxReturn,
];
const MAIN_MIX_SOURCES: &[ChannelType] = &[
    ChannelType::Input,
    ChannelType::MonoGroup,
    ChannelType::StereoGroup,
    ChannelType::FxReturn,
    ChannelType::StereoUfxReturn,
];
const SEND_SOURCES: &[ChannelType] = &[
    ChannelType::Input,
    ChannelType::MonoGroup,
    ChannelType::StereoGroup,
    ChannelType::FxReturn,
    ChannelType::Main,
    ChannelType::StereoUfxReturn,
];
const SEND_DESTINATIONS: &[ChannelType] = &[
    ChannelType::MonoAux,
    ChannelType::StereoAux,
    ChannelType::MonoFxSend,
    ChannelType::StereoFxSend,
    ChannelType::MonoMatrix,
    ChannelType::StereoMatrix,
];
const GROUP_AUX_DESTINATIONS: &[ChannelType] = &[
    ChannelType::MonoGroup,
    ChannelType::StereoGroup,
    ChannelType::MonoAux,
    ChannelType::StereoAux,
];

fn channel_type_hint(allowed: &[ChannelType]) -> String {
    let names: Vec<&str> = allowed.iter().map(|t| t.name()).collect();
    return format!("one of {}", names.join(", "));
}

fn choice_hint<C: Choice>() -> String {
    format!("one of {}", C::names().join(", "))
}

fn channel_specs(prefix: &str, allowed: &[ChannelType]) -> Vec<Spec> {
    vec![
        Spec::str(&format!("{}type", prefix), true).with_hint(&channel_type_hint(allowed)),
        Spec::u8(&format!("{}no", prefix), true).with_hint("0-based channel number"),
    ]
}

fn socket_specs() -> Vec<Spec> {
    let names: Vec<&str> = SocketType::ALL.iter().map(|t| t.name()).collect();
    vec![
        Spec::str("socket_type", true).with_hint(&format!("one of {}", names.join(", "))),
        Spec::u8("socket_no", true).with_hint("0-based socket number"),
    ]
}

fn specs(groups: Vec<Vec<Spec>>) -> Vec<Spec> {
    groups.into_iter().flatten().collect()
}

lazy_static! {
    pub static ref ACTIONS: Vec<ActionDef> = vec![
        ActionDef {
            name: "mute",
            description: "Mute or unmute a channel",
            params: specs(vec![channel_specs("", ANY_CHANNEL), vec![Spec::bool("mute", true).with_hint("on or off")]]),
            build: build_mute,
        },
        ActionDef {
            name: "fader-level",
            description: "Set the fader level of a channel",
            params: specs(vec![channel_specs("", FADER_CHANNELS), vec![Spec::u8("level", true).with_hint("0-127, 107 is 0 dB")]]),
            build: build_fader_level,
        },
        ActionDef {
            name: "assign-main-mix",
            description: "Assign a channel to the main mix",
            params: specs(vec![channel_specs("", MAIN_MIX_SOURCES), vec![Spec::bool("assign", true).with_hint("on or off")]]),
            build: build_assign_main_mix,
        },
        ActionDef {
            name: "send-level",
            description: "Set the aux, FX or matrix send level of a channel",
            params: specs(vec![
                channel_specs("", SEND_SOURCES),
                channel_specs("destination_", SEND_DESTINATIONS),
                vec![Spec::u8("level", true).with_hint("0-127")],
            ]),
            build: build_send_level,
        },
        ActionDef {
            name: "input-to-group-aux",
            description: "Switch on the send of an input to a group or aux",
            params: specs(vec![
                vec![Spec::u8("input", true).with_hint("0-based input number")],
                channel_specs("destination_", GROUP_AUX_DESTINATIONS),
            ]),
            build: build_input_to_group_aux,
        },
        ActionDef {
            name: "dca-assign",
            description: "Assign a channel to a DCA",
            params: specs(vec![
                channel_specs("", AUDIO_PATHS),
                vec![
                    Spec::u8("dca", true).with_hint("0-based DCA number"),
                    Spec::bool("assign", true).with_hint("on or off"),
                ],
            ]),
            build: build_dca_assign,
        },
        ActionDef {
            name: "mute-group-assign",
            description: "Assign a channel to a mute group",
            params: specs(vec![
                channel_specs("", AUDIO_PATHS),
                vec![
                    Spec::u8("mute_group", true).with_hint("0-based mute group number"),
                    Spec::bool("assign", true).with_hint("on or off"),
                ],
            ]),
            build: build_mute_group_assign,
        },
        ActionDef {
            name: "preamp-gain",
            description: "Set the gain of a socket preamp",
            params: specs(vec![socket_specs(), vec![Spec::number("gain", true).with_hint("5.0-60.0 dB")]]),
            build: build_preamp_gain,
        },
        ActionDef {
            name: "preamp-pad",
            description: "Switch the pad of a socket preamp",
            params: specs(vec![socket_specs(), vec![Spec::bool("pad", true).with_hint("on or off")]]),
            build: build_preamp_pad,
        },
        ActionDef {
            name: "preamp-48v",
            description: "Switch phantom power of a socket preamp",
            params: specs(vec![socket_specs(), vec![Spec::bool("phantom", true).with_hint("on or off")]]),
            build: build_preamp_48v,
        },
        ActionDef {
            name: "channel-name",
            description: "Rename a channel",
            params: specs(vec![channel_specs("", AUDIO_PATHS), vec![Spec::str("name", true).with_hint("quote names with spaces")]]),
            build: build_channel_name,
        },
        ActionDef {
            name: "channel-colour",
            description: "Set the colour of a channel",
            params: specs(vec![channel_specs("", AUDIO_PATHS), vec![Spec::str("colour", true).with_hint(&choice_hint::<ChannelColour>())]]),
            build: build_channel_colour,
        },
        ActionDef {
            name: "scene-recall",
            description: "Recall a scene",
            params: vec![Spec::u16("scene", true).with_hint("0-499")],
            build: build_scene_recall,
        },
        ActionDef {
            name: "cue-list-recall",
            description: "Recall a cue list",
            params: vec![Spec::u16("cue_list", true).with_hint("0-1998")],
            build: build_cue_list_recall,
        },
        ActionDef {
            name: "go-next-previous",
            description: "Send the control change assigned to go next or go previous",
            params: vec![
                Spec::u8("controller", true).with_hint("0-127"),
                Spec::u8("value", true).with_hint("0-127"),
            ],
            build: build_go_next_previous,
        },
        ActionDef {
            name: "parametric-eq",
            description: "Set one band of the parametric EQ of a channel",
            params: specs(vec![
                channel_specs("", AUDIO_PATHS),
                vec![
                    Spec::u8("band", true).with_hint("0-3"),
                    Spec::str("eq_type", true).with_hint(&choice_hint::<EqType>()),
                    Spec::number("frequency", true).with_hint("20-20000 Hz"),
                    Spec::number("width", true).with_hint("0.1-1.5 octaves"),
                    Spec::number("gain", true).with_hint("-15.0-15.0 dB"),
                ],
            ]),
            build: build_parametric_eq,
        },
        ActionDef {
            name: "hpf-frequency",
            description: "Set the high pass filter frequency of an input",
            params: vec![
                Spec::u8("input", true).with_hint("0-based input number"),
                Spec::number("frequency", true).with_hint("20-2000 Hz"),
            ],
            build: build_hpf_frequency,
        },
        ActionDef {
            name: "hpf-on-off",
            description: "Switch the high pass filter of an input",
            params: vec![
                Spec::u8("input", true).with_hint("0-based input number"),
                Spec::bool("hpf", true).with_hint("on or off"),
            ],
            build: build_hpf_on_off,
        },
        ActionDef {
            name: "ufx-global-key",
            description: "Set the global UFX key",
            params: vec![Spec::str("key", true).with_hint(&choice_hint::<UfxKey>())],
            build: build_ufx_global_key,
        },
        ActionDef {
            name: "ufx-global-scale",
            description: "Set the global UFX scale",
            params: vec![Spec::str("scale", true).with_hint(&choice_hint::<UfxScale>())],
            build: build_ufx_global_scale,
        },
        ActionDef {
            name: "ufx-unit-parameter",
            description: "Send a control change to a UFX unit",
            params: ufx_unit_specs(Spec::u8("value", true).with_hint("0-127")),
            build: build_ufx_unit_parameter,
        },
        ActionDef {
            name: "ufx-unit-key",
            description: "Set the key parameter of a UFX unit",
            params: ufx_unit_specs(Spec::str("key", true).with_hint(&choice_hint::<UfxKey>())),
            build: build_ufx_unit_key,
        },
        ActionDef {
            name: "ufx-unit-scale",
            description: "Set the scale parameter of a UFX unit",
            params: ufx_unit_specs(Spec::str("scale", true).with_hint(&choice_hint::<UfxUnitScale>())),
            build: build_ufx_unit_scale,
        },
    ];
}

fn ufx_unit_specs(last: Spec) -> Vec<Spec> {
    vec![
        Spec::u8("midi_channel", true).with_hint("1-16"),
        Spec::u8("controller", true).with_hint("0-127"),
        last,
    ]
}

pub fn find_action(name: &str) -> Option<&'static ActionDef> {
    ACTIONS.iter().find(|action| action.name == name)
}

// Builders /////////////////////////////////////////////////////////////////

fn build_mute(params: &[Value]) -> Result<Command> {
    Ok(Command::Mute {
        channel: channel_param(params, 0, ANY_CHANNEL)?,
        on: param(params, 2)?.as_bool()?,
    })
}

fn build_fader_level(params: &[Value]) -> Result<Command> {
    Ok(Command::FaderLevel {
        channel: channel_param(params, 0, FADER_CHANNELS)?,
        level: check_seven_bits("level", param(params, 2)?.as_u8()?)?,
    })
}

fn build_assign_main_mix(params: &[Value]) -> Result<Command> {
    Ok(Command::AssignMainMix {
        channel: channel_param(params, 0, MAIN_MIX_SOURCES)?,
        on: param(params, 2)?.as_bool()?,
    })
}

fn build_send_level(params: &[Value]) -> Result<Command> {
    Ok(Command::SendLevel {
        source: channel_param(params, 0, SEND_SOURCES)?,
        destination: channel_param(params, 2, SEND_DESTINATIONS)?,
        level: check_seven_bits("level", param(params, 4)?.as_u8()?)?,
    })
}

fn build_input_to_group_aux(params: &[Value]) -> Result<Command> {
    Ok(Command::InputToGroupAux {
        source: ChannelRef::new(ChannelType::Input, param(params, 0)?.as_u8()?)?,
        destination: channel_param(params, 1, GROUP_AUX_DESTINATIONS)?,
    })
}

fn build_dca_assign(params: &[Value]) -> Result<Command> {
    let dca = ChannelRef::new(ChannelType::Dca, param(params, 2)?.as_u8()?)?;
    Ok(Command::DcaAssign {
        channel: channel_param(params, 0, AUDIO_PATHS)?,
        dca: dca.number(),
        on: param(params, 3)?.as_bool()?,
    })
}

fn build_mute_group_assign(params: &[Value]) -> Result<Command> {
    let mute_group = ChannelRef::new(ChannelType::MuteGroup, param(params, 2)?.as_u8()?)?;
    Ok(Command::MuteGroupAssign {
        channel: channel_param(params, 0, AUDIO_PATHS)?,
        mute_group: mute_group.number(),
        on: param(params, 3)?.as_bool()?,
    })
}

fn build_preamp_gain(params: &[Value]) -> Result<Command> {
    Ok(Command::PreampGain {
        socket: socket_param(params, 0)?,
        gain_db: gain_in_range(
            param(params, 2)?.as_number()?,
            PREAMP_GAIN_MIN_DB,
            PREAMP_GAIN_MAX_DB,
        )?,
    })
}

fn build_preamp_pad(params: &[Value]) -> Result<Command> {
    Ok(Command::PreampPad {
        socket: socket_param(params, 0)?,
        on: param(params, 2)?.as_bool()?,
    })
}

fn build_preamp_48v(params: &[Value]) -> Result<Command> {
    Ok(Command::Preamp48v {
        socket: socket_param(params, 0)?,
        on: param(params, 2)?.as_bool()?,
    })
}

fn build_channel_name(params: &[Value]) -> Result<Command> {
    Ok(Command::ChannelName {
        channel: channel_param(params, 0, AUDIO_PATHS)?,
        name: param(params, 2)?.as_text()?,
    })
}

fn build_channel_colour(params: &[Value]) -> Result<Command> {
    Ok(Command::ChannelColour {
        channel: channel_param(params, 0, AUDIO_PATHS)?,
        colour: choice_param::<ChannelColour>(params, 2, "colour")?,
    })
}

fn build_scene_recall(params: &[Value]) -> Result<Command> {
    let scene = param(params, 0)?.as_u16()?;
    if scene >= DLIVE_SCENE_COUNT {
        return Err(AppError::invalid_parameter(format!(
            "scene {} out of range (0-{})",
            scene,
            DLIVE_SCENE_COUNT - 1
        )));
    }
    Ok(Command::SceneRecall { scene })
}

fn build_cue_list_recall(params: &[Value]) -> Result<Command> {
    let cue_list = param(params, 0)?.as_u16()?;
    if cue_list >= DLIVE_CUE_LIST_COUNT {
        return Err(AppError::invalid_parameter(format!(
            "cue list {} out of range (0-{})",
            cue_list,
            DLIVE_CUE_LIST_COUNT - 1
        )));
    }
    Ok(Command::CueListRecall { cue_list })
}

fn build_go_next_previous(params: &[Value]) -> Result<Command> {
    Ok(Command::GoNextPrevious {
        controller: check_seven_bits("controller", param(params, 0)?.as_u8()?)?,
        value: check_seven_bits("value", param(params, 1)?.as_u8()?)?,
    })
}

fn build_parametric_eq(params: &[Value]) -> Result<Command> {
    let band = param(params, 2)?.as_u8()?;
    let Ok(band) = EqBand::try_from(band) else {
        return Err(AppError::invalid_parameter(format!(
            "band {} out of range (0-3)",
            band
        )));
    };
    Ok(Command::ParametricEq {
        channel: channel_param(params, 0, AUDIO_PATHS)?,
        band,
        eq_type: choice_param::<EqType>(params, 3, "eq_type")?,
        frequency_hz: number_in_range(
            "frequency",
            param(params, 4)?.as_number()?,
            EQ_FREQUENCY_MIN_HZ,
            EQ_FREQUENCY_MAX_HZ,
        )?,
        width: number_in_range(
            "width",
            param(params, 5)?.as_number()?,
            EQ_WIDTH_MIN,
            EQ_WIDTH_MAX,
        )?,
        gain_db: gain_in_range(param(params, 6)?.as_number()?, EQ_GAIN_MIN_DB, EQ_GAIN_MAX_DB)?,
    })
}

fn build_hpf_frequency(params: &[Value]) -> Result<Command> {
    Ok(Command::HpfFrequency {
        channel: ChannelRef::new(ChannelType::Input, param(params, 0)?.as_u8()?)?,
        frequency_hz: number_in_range(
            "frequency",
            param(params, 1)?.as_number()?,
            HPF_FREQUENCY_MIN_HZ,
            HPF_FREQUENCY_MAX_HZ,
        )?,
    })
}

fn build_hpf_on_off(params: &[Value]) -> Result<Command> {
    Ok(Command::HpfOnOff {
        channel: ChannelRef::new(ChannelType::Input, param(params, 0)?.as_u8()?)?,
        on: param(params, 1)?.as_bool()?,
    })
}

fn build_ufx_global_key(params: &[Value]) -> Result<Command> {
    Ok(Command::UfxGlobalKey {
        key: choice_param::<UfxKey>(params, 0, "key")?,
    })
}

fn build_ufx_global_scale(params: &[Value]) -> Result<Command> {
    Ok(Command::UfxGlobalScale {
        scale: choice_param::<UfxScale>(params, 0, "scale")?,
    })
}

fn build_ufx_unit_parameter(params: &[Value]) -> Result<Command> {
    Ok(Command::UfxUnitParameter {
        midi_channel: ufx_midi_channel(params)?,
        controller: check_seven_bits("controller", param(params, 1)?.as_u8()?)?,
        value: check_seven_bits("value", param(params, 2)?.as_u8()?)?,
    })
}

fn build_ufx_unit_key(params: &[Value]) -> Result<Command> {
    Ok(Command::UfxUnitKey {
        midi_channel: ufx_midi_channel(params)?,
        controller: check_seven_bits("controller", param(params, 1)?.as_u8()?)?,
        key: choice_param::<UfxKey>(params, 2, "key")?,
    })
}

fn build_ufx_unit_scale(params: &[Value]) -> Result<Command> {
    Ok(Command::UfxUnitScale {
        midi_channel: ufx_midi_channel(params)?,
        controller: check_seven_bits("controller", param(params, 1)?.as_u8()?)?,
        scale: choice_param::<UfxUnitScale>(params, 2, "scale")?,
    })
}

// Parameter helpers ////////////////////////////////////////////////////////

fn param(params: &[Value], index: usize) -> Result<&Value> {
    params
        .get(index)
        .ok_or_else(|| AppError::invalid_parameter(format!("missing parameter #{}", index + 1)))
}

/// Reads a channel type name at `index` and its number right after it.
fn channel_param(params: &[Value], index: usize, allowed: &[ChannelType]) -> Result<ChannelRef> {
    let type_name = param(params, index)?.as_text()?;
    let channel_type = match ChannelType::from_name(&type_name) {
        Some(channel_type) if allowed.contains(&channel_type) => channel_type,
        _ => {
            return Err(AppError::invalid_parameter(format!(
                "channel type {} not allowed; {}",
                type_name,
                channel_type_hint(allowed)
            )));
        }
    };
    let number = param(params, index + 1)?.as_u8()?;
    return ChannelRef::new(channel_type, number);
}

fn socket_param(params: &[Value], index: usize) -> Result<SocketRef> {
    let type_name = param(params, index)?.as_text()?;
    let Some(socket_type) = SocketType::from_name(&type_name) else {
        return Err(AppError::invalid_parameter(format!(
            "unknown socket type {}",
            type_name
        )));
    };
    let number = param(params, index + 1)?.as_u8()?;
    return SocketRef::new(socket_type, number);
}

fn choice_param<C: Choice>(params: &[Value], index: usize, name: &str) -> Result<C> {
    let text = param(params, index)?.as_text()?;
    C::from_name(&text).ok_or_else(|| {
        AppError::invalid_parameter(format!("{} {} not allowed; {}", name, text, choice_hint::<C>()))
    })
}

fn number_in_range(name: &str, value: f64, min: f64, max: f64) -> Result<f64> {
    if value < min || value > max {
        return Err(AppError::invalid_parameter(format!(
            "{} {} out of range ({}-{})",
            name, value, min, max
        )));
    }
    Ok(value)
}

/// Gains are set in 0.5 dB steps
fn gain_in_range(value: f64, min: f64, max: f64) -> Result<f64> {
    let value = number_in_range("gain", value, min, max)?;
    if (value * 2.0).fract() != 0.0 {
        return Err(AppError::invalid_parameter(format!(
            "gain {} is not a multiple of 0.5 dB",
            value
        )));
    }
    Ok(value)
}

fn ufx_midi_channel(params: &[Value]) -> Result<u8> {
    let midi_channel = param(params, 0)?.as_u8()?;
    if !(1..=16).contains(&midi_channel) {
        return Err(AppError::invalid_parameter(format!(
            "midi channel {} out of range (1-16)",
            midi_channel
        )));
    }
    Ok(midi_channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;

    fn text(value: &str) -> Value {
        Value::Text(value.to_string())
    }

    fn build(name: &str, params: Vec<Value>) -> Result<Command> {
        let Some(action) = find_action(name) else {
            panic!("no action {}", name);
        };
        (action.build)(&params)
    }

    fn assert_invalid(result: Result<Command>) {
        match result {
            Err(e) => assert_eq!(e.error_type, ErrorType::InvalidParameter),
            Ok(command) => panic!("accepted: {}", command),
        }
    }

    #[test]
    fn test_catalogue_is_complete() {
        let names: Vec<&str> = ACTIONS.iter().map(|a| a.name).collect();
        assert_eq!(names.len(), 23);
        for name in [
            "mute",
            "fader-level",
            "send-level",
            "parametric-eq",
            "ufx-unit-scale",
        ] {
            assert!(names.contains(&name), "{}", name);
        }
        assert!(find_action("solo").is_none());
    }

    #[test]
    fn test_usage() {
        let Some(action) = find_action("send-level") else {
            panic!();
        };
        assert_eq!(
            action.usage(),
            "send-level <type> <no> <destination_type> <destination_no> <level>"
        );
    }

    #[test]
    fn test_build_mute() {
        let command = build("mute", vec![text("dca"), Value::U8(23), Value::Bool(true)]);
        let Ok(Command::Mute { channel, on }) = command else {
            panic!();
        };
        assert_eq!(channel.channel_type(), ChannelType::Dca);
        assert_eq!(channel.number(), 23);
        assert!(on);
    }

    #[test]
    fn test_channel_number_out_of_range() {
        assert_invalid(build("mute", vec![text("dca"), Value::U8(24), Value::Bool(true)]));
        assert_invalid(build("mute", vec![text("bus"), Value::U8(0), Value::Bool(true)]));
    }

    #[test]
    fn test_channel_type_not_allowed() {
        assert_invalid(build(
            "fader-level",
            vec![text("mute_group"), Value::U8(0), Value::U8(10)],
        ));
        assert_invalid(build(
            "send-level",
            vec![
                text("input"),
                Value::U8(0),
                text("mono_group"),
                Value::U8(0),
                Value::U8(10),
            ],
        ));
        assert_invalid(build(
            "channel-name",
            vec![text("dca"), Value::U8(0), text("x")],
        ));
    }

    #[test]
    fn test_level_range() {
        assert_invalid(build(
            "fader-level",
            vec![text("input"), Value::U8(0), Value::U8(128)],
        ));
        assert!(build("fader-level", vec![text("input"), Value::U8(0), Value::U8(127)]).is_ok());
    }

    #[test]
    fn test_dca_and_mute_group_ranges() {
        assert!(
            build(
                "dca-assign",
                vec![text("input"), Value::U8(0), Value::U8(23), Value::Bool(true)]
            )
            .is_ok()
        );
        assert_invalid(build(
            "dca-assign",
            vec![text("input"), Value::U8(0), Value::U8(24), Value::Bool(true)],
        ));
        assert_invalid(build(
            "mute-group-assign",
            vec![text("input"), Value::U8(0), Value::U8(8), Value::Bool(true)],
        ));
    }

    #[test]
    fn test_preamp_gain_range() {
        let socket = vec![text("mixrack_sockets_1_to_64"), Value::U8(63)];
        let mut params = socket.clone();
        params.push(Value::Number(5.0));
        assert!(build("preamp-gain", params).is_ok());
        let mut params = socket.clone();
        params.push(Value::Number(60.5));
        assert_invalid(build("preamp-gain", params));
        assert_invalid(build(
            "preamp-pad",
            vec![text("mixrack_dx_1_to_2"), Value::U8(32), Value::Bool(true)],
        ));
    }

    #[test]
    fn test_gain_step() {
        let preamp = |gain: f64| {
            vec![text("mixrack_sockets_1_to_64"), Value::U8(0), Value::Number(gain)]
        };
        assert!(build("preamp-gain", preamp(7.5)).is_ok());
        assert_invalid(build("preamp-gain", preamp(7.3)));

        let eq = |gain: f64| {
            vec![
                text("input"),
                Value::U8(0),
                Value::U8(0),
                text("bell"),
                Value::Number(1000.0),
                Value::Number(1.0),
                Value::Number(gain),
            ]
        };
        assert!(build("parametric-eq", eq(-0.5)).is_ok());
        assert_invalid(build("parametric-eq", eq(0.3)));
    }

    #[test]
    fn test_scene_and_cue_list_ranges() {
        assert!(build("scene-recall", vec![Value::U16(499)]).is_ok());
        assert_invalid(build("scene-recall", vec![Value::U16(500)]));
        assert!(build("cue-list-recall", vec![Value::U16(1998)]).is_ok());
        assert_invalid(build("cue-list-recall", vec![Value::U16(1999)]));
    }

    #[test]
    fn test_build_parametric_eq() {
        let params = vec![
            text("input"),
            Value::U8(0),
            Value::U8(1),
            text("low_shelf"),
            Value::Number(100.0),
            Value::Number(0.5),
            Value::Number(-3.0),
        ];
        let Ok(Command::ParametricEq { band, eq_type, .. }) = build("parametric-eq", params)
        else {
            panic!();
        };
        assert_eq!(band, EqBand::Band2);
        assert_eq!(eq_type, EqType::LowShelf);
    }

    #[test]
    fn test_parametric_eq_ranges() {
        let base = |band: u8, frequency: f64, width: f64, gain: f64| {
            vec![
                text("input"),
                Value::U8(0),
                Value::U8(band),
                text("bell"),
                Value::Number(frequency),
                Value::Number(width),
                Value::Number(gain),
            ]
        };
        assert_invalid(build("parametric-eq", base(4, 1000.0, 1.0, 0.0)));
        assert_invalid(build("parametric-eq", base(0, 19.0, 1.0, 0.0)));
        assert_invalid(build("parametric-eq", base(0, 1000.0, 1.6, 0.0)));
        assert_invalid(build("parametric-eq", base(0, 1000.0, 1.0, 15.5)));
        assert!(build("parametric-eq", base(3, 20000.0, 0.1, -15.0)).is_ok());
    }

    #[test]
    fn test_hpf_is_input_only() {
        let Ok(Command::HpfFrequency { channel, .. }) =
            build("hpf-frequency", vec![Value::U8(5), Value::Number(80.0)])
        else {
            panic!();
        };
        assert_eq!(channel.channel_type(), ChannelType::Input);
        assert_invalid(build("hpf-frequency", vec![Value::U8(5), Value::Number(2500.0)]));
    }

    #[test]
    fn test_ufx_ranges() {
        assert!(build("ufx-global-key", vec![text("G#")]).is_ok());
        assert_invalid(build("ufx-global-key", vec![text("H")]));
        assert_invalid(build("ufx-global-scale", vec![text("chromatic")]));
        assert!(
            build(
                "ufx-unit-scale",
                vec![Value::U8(16), Value::U8(0), text("chromatic")]
            )
            .is_ok()
        );
        assert_invalid(build(
            "ufx-unit-parameter",
            vec![Value::U8(0), Value::U8(0), Value::U8(0)],
        ));
        assert_invalid(build(
            "ufx-unit-parameter",
            vec![Value::U8(17), Value::U8(0), Value::U8(0)],
        ));
    }

    #[test]
    fn test_missing_parameter() {
        assert_invalid(build("scene-recall", vec![]));
    }
}

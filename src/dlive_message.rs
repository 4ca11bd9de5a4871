use crate::{
    command::{ChannelRef, Command, SocketRef},
    dlive::{self as dl, convert, topology::ChannelType},
    error::AppError,
};

/// One complete protocol frame, written to the mixrack in a single send.
pub type MidiFrame = Vec<u8>;

/// Turns commands into frames for a mixrack listening on a given base MIDI channel.
#[derive(Debug, Clone, Copy)]
pub struct CommandEncoder {
    base_channel: u8,
}

impl CommandEncoder {
    /// # Arguments
    /// * `base_channel` - 0-based MIDI channel of inputs; the mixrack uses it and the next four
    pub fn new(base_channel: u8) -> Result<Self, AppError> {
        if base_channel > dl::DLIVE_MAX_BASE_CHANNEL {
            return Err(AppError::invalid_parameter(format!(
                "base MIDI channel {} out of range (0-{})",
                base_channel,
                dl::DLIVE_MAX_BASE_CHANNEL
            )));
        }
        Ok(Self { base_channel })
    }

    pub fn encode(&self, command: &Command) -> Vec<MidiFrame> {
        let n = self.base_channel;
        match command {
            Command::Mute { channel, on } => {
                let velocity = if *on { dl::DLIVE_VALUE_ON } else { dl::DLIVE_VALUE_OFF };
                vec![note_on(self.channel_of(channel), channel.note(), velocity)]
            }
            Command::FaderLevel { channel, level } => {
                vec![self.nrpn(channel, dl::DLIVE_PARAM_FADER, *level)]
            }
            Command::AssignMainMix { channel, on } => {
                let value = if *on { dl::DLIVE_VALUE_ON } else { dl::DLIVE_VALUE_OFF };
                vec![self.nrpn(channel, dl::DLIVE_PARAM_MAIN_MIX, value)]
            }
            Command::SendLevel {
                source,
                destination,
                level,
            } => vec![sysex(
                self.channel_of(source),
                dl::DLIVE_SYSEX_SEND_LEVEL,
                &[
                    source.note(),
                    self.channel_of(destination),
                    destination.note(),
                    *level,
                ],
            )],
            Command::InputToGroupAux {
                source,
                destination,
            } => vec![sysex(
                self.channel_of(source),
                dl::DLIVE_SYSEX_INPUT_TO_GROUP_AUX,
                &[
                    source.note(),
                    self.channel_of(destination),
                    destination.note(),
                    dl::DLIVE_FLAG_ON,
                ],
            )],
            Command::DcaAssign { channel, dca, on } => {
                let value = if *on {
                    dca + dl::DLIVE_ROUTING_DCA_ON
                } else {
                    dca + dl::DLIVE_ROUTING_DCA_OFF
                };
                vec![self.nrpn(channel, dl::DLIVE_PARAM_ROUTING, value)]
            }
            Command::MuteGroupAssign {
                channel,
                mute_group,
                on,
            } => {
                let value = if *on {
                    mute_group + dl::DLIVE_ROUTING_MUTE_GROUP_ON
                } else {
                    mute_group + dl::DLIVE_ROUTING_MUTE_GROUP_OFF
                };
                vec![self.nrpn(channel, dl::DLIVE_PARAM_ROUTING, value)]
            }
            Command::PreampGain { socket, gain_db } => vec![vec![
                dl::DLIVE_STATUS_PITCH_BEND + n,
                socket.note(),
                convert::preamp_gain_to_midi(*gain_db),
            ]],
            Command::PreampPad { socket, on } => {
                vec![self.socket_switch(socket, dl::DLIVE_SYSEX_PREAMP_PAD, *on)]
            }
            Command::Preamp48v { socket, on } => {
                vec![self.socket_switch(socket, dl::DLIVE_SYSEX_PREAMP_48V, *on)]
            }
            Command::ChannelName { channel, name } => {
                let mut payload = vec![channel.note()];
                payload.extend(name.chars().map(|c| (c as u32 & 0x7F) as u8));
                vec![sysex(self.channel_of(channel), dl::DLIVE_SYSEX_NAME, &payload)]
            }
            Command::ChannelColour { channel, colour } => vec![sysex(
                self.channel_of(channel),
                dl::DLIVE_SYSEX_COLOUR,
                &[channel.note(), u8::from(*colour)],
            )],
            Command::SceneRecall { scene } => {
                let bank = (scene / dl::DLIVE_BANK_SIZE) as u8;
                let program = (scene % dl::DLIVE_BANK_SIZE) as u8;
                vec![bank_and_program(n, bank, program)]
            }
            Command::CueListRecall { cue_list } => {
                let program = (cue_list % dl::DLIVE_BANK_SIZE) as u8;
                vec![bank_and_program(n, cue_list_bank(*cue_list), program)]
            }
            Command::GoNextPrevious { controller, value } => {
                vec![control_change(n, *controller, *value)]
            }
            Command::ParametricEq {
                channel,
                band,
                eq_type,
                frequency_hz,
                width,
                gain_db,
            } => {
                let first = dl::DLIVE_PARAM_EQ_BASE + 4 * u8::from(*band);
                let frequency = convert::eq_frequency_to_midi(*frequency_hz);
                log::debug!(
                    "EQ frequency {} Hz -> {} Hz",
                    frequency_hz,
                    convert::midi_to_frequency(frequency, convert::EQ_FREQUENCY_SPAN)
                );
                vec![
                    self.nrpn(channel, first, u8::from(*eq_type)),
                    self.nrpn(channel, first + 1, frequency),
                    self.nrpn(channel, first + 2, convert::eq_width_to_midi(*width)),
                    self.nrpn(channel, first + 3, convert::eq_gain_to_midi(*gain_db)),
                ]
            }
            Command::HpfFrequency {
                channel,
                frequency_hz,
            } => {
                let frequency = convert::hpf_frequency_to_midi(*frequency_hz);
                log::debug!(
                    "HPF frequency {} Hz -> {} Hz",
                    frequency_hz,
                    convert::midi_to_frequency(frequency, convert::HPF_FREQUENCY_SPAN)
                );
                vec![self.nrpn(channel, dl::DLIVE_PARAM_HPF_FREQUENCY, frequency)]
            }
            Command::HpfOnOff { channel, on } => {
                let value = if *on { dl::DLIVE_FLAG_ON } else { dl::DLIVE_FLAG_OFF };
                vec![self.nrpn(channel, dl::DLIVE_PARAM_HPF_ON_OFF, value)]
            }
            Command::UfxGlobalKey { key } => {
                vec![control_change(n, dl::DLIVE_CC_UFX_KEY, u8::from(*key))]
            }
            Command::UfxGlobalScale { scale } => {
                vec![control_change(n, dl::DLIVE_CC_UFX_SCALE, u8::from(*scale))]
            }
            Command::UfxUnitParameter {
                midi_channel,
                controller,
                value,
            } => vec![control_change(
                self.ufx_unit_channel(*midi_channel),
                *controller,
                *value,
            )],
            Command::UfxUnitKey {
                midi_channel,
                controller,
                key,
            } => vec![control_change(
                self.ufx_unit_channel(*midi_channel),
                *controller,
                convert::ufx_unit_key_value(*key),
            )],
            Command::UfxUnitScale {
                midi_channel,
                controller,
                scale,
            } => vec![control_change(
                self.ufx_unit_channel(*midi_channel),
                *controller,
                convert::ufx_unit_scale_value(*scale),
            )],
        }
    }

    // Helpers //////////////////////////////////////////////////////////////

    fn channel_of(&self, channel: &ChannelRef) -> u8 {
        self.base_channel + channel.channel_type().offsets().channel
    }

    fn nrpn(&self, channel: &ChannelRef, parameter: u8, value: u8) -> MidiFrame {
        vec![
            dl::DLIVE_STATUS_CONTROL_CHANGE + self.channel_of(channel),
            dl::DLIVE_CC_NRPN_MSB,
            channel.note(),
            dl::DLIVE_CC_NRPN_LSB,
            parameter,
            dl::DLIVE_CC_DATA_ENTRY,
            value,
        ]
    }

    // Sockets are addressed on the input channel
    fn socket_switch(&self, socket: &SocketRef, opcode: u8, on: bool) -> MidiFrame {
        let flag = if on { dl::DLIVE_FLAG_ON } else { dl::DLIVE_FLAG_OFF };
        let channel = self.base_channel + ChannelType::Input.offsets().channel;
        sysex(channel, opcode, &[socket.note(), flag])
    }

    // UFX units listen on their own 1-based channel, counted from the base channel
    fn ufx_unit_channel(&self, midi_channel: u8) -> u8 {
        (self.base_channel + midi_channel).wrapping_sub(1) & 0x0F
    }
}

fn note_on(channel: u8, note: u8, velocity: u8) -> MidiFrame {
    vec![dl::DLIVE_STATUS_NOTE_ON + channel, note, velocity, note, 0x00]
}

fn control_change(channel: u8, controller: u8, value: u8) -> MidiFrame {
    vec![dl::DLIVE_STATUS_CONTROL_CHANGE + channel, controller, value]
}

fn bank_and_program(channel: u8, bank: u8, program: u8) -> MidiFrame {
    vec![
        dl::DLIVE_STATUS_CONTROL_CHANGE + channel,
        dl::DLIVE_CC_BANK_SELECT,
        bank,
        dl::DLIVE_STATUS_PROGRAM_CHANGE + channel,
        program,
    ]
}

fn sysex(channel: u8, opcode: u8, payload: &[u8]) -> MidiFrame {
    let mut frame = Vec::with_capacity(dl::DLIVE_SYSEX_HEADER.len() + payload.len() + 3);
    frame.extend_from_slice(&dl::DLIVE_SYSEX_HEADER);
    frame.push(channel);
    frame.push(opcode);
    frame.extend_from_slice(payload);
    frame.push(dl::DLIVE_SYSEX_END);
    return frame;
}

/// Bank select value of a cue list. Never above 15.
pub fn cue_list_bank(cue_list: u16) -> u8 {
    let bank = cue_list / dl::DLIVE_BANK_SIZE;
    return bank.min(dl::DLIVE_MAX_CUE_LIST_BANK as u16) as u8;
}

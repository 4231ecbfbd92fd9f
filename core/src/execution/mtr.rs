use fedlink_codec::{
    decode_f64_le, decode_i16_le, encode_f64_le, encode_i16_le, ByteReader, ByteWriter,
};
use log::warn;

use crate::queue::item::ParameterItem;

use super::{error::ExecutionError, mode::MtrMode};

/// A Mode Transition Request: the ephemeral interaction any federate may
/// send and only the master consumes. Times are advisory snapshots of the
/// sender's timelines; a future `scenario_time` requests the transition at
/// that TT instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTransitionRequest {
    pub execution_mode: MtrMode,
    pub sim_time: f64,
    pub scenario_time: f64,
    pub cte_time: f64,
}

/// Wire parameter indices, fixed by the FOM.
const PARAMETER_EXECUTION_MODE: i32 = 0;
const PARAMETER_SIM_TIME: i32 = 1;
const PARAMETER_SCENARIO_TIME: i32 = 2;
const PARAMETER_CTE_TIME: i32 = 3;

impl ModeTransitionRequest {
    pub const INTERACTION_CLASS: &'static str = "ModeTransitionRequest";

    pub fn new(execution_mode: MtrMode) -> Self {
        Self {
            execution_mode,
            sim_time: 0.0,
            scenario_time: 0.0,
            cte_time: 0.0,
        }
    }

    /// Encode into the four wire parameters.
    pub fn encode(&self) -> Vec<ParameterItem> {
        let mut mode_writer = ByteWriter::with_capacity(2);
        encode_i16_le(&mut mode_writer, self.execution_mode.as_i16());

        let mut parameters = vec![ParameterItem {
            index: PARAMETER_EXECUTION_MODE,
            data: mode_writer.to_bytes().into_boxed_slice(),
        }];
        for (index, value) in [
            (PARAMETER_SIM_TIME, self.sim_time),
            (PARAMETER_SCENARIO_TIME, self.scenario_time),
            (PARAMETER_CTE_TIME, self.cte_time),
        ] {
            let mut writer = ByteWriter::with_capacity(8);
            encode_f64_le(&mut writer, value);
            parameters.push(ParameterItem {
                index,
                data: writer.to_bytes().into_boxed_slice(),
            });
        }
        parameters
    }

    /// Decode from received wire parameters.
    ///
    /// A truncated or malformed time parameter is dropped individually
    /// (the request stays usable) and counted in the returned tally; a
    /// missing or malformed execution_mode makes the whole request
    /// undecodable.
    pub fn decode(parameters: &[ParameterItem]) -> Result<(Self, usize), ExecutionError> {
        let mut execution_mode = None;
        let mut sim_time = 0.0;
        let mut scenario_time = 0.0;
        let mut cte_time = 0.0;
        let mut dropped = 0;

        for parameter in parameters {
            let mut reader = ByteReader::new(&parameter.data);
            match parameter.index {
                PARAMETER_EXECUTION_MODE => match decode_i16_le(&mut reader) {
                    Ok(raw) => execution_mode = Some(MtrMode::try_from(raw)?),
                    Err(codec_error) => {
                        warn!("MTR execution_mode undecodable: {}", codec_error);
                    }
                },
                PARAMETER_SIM_TIME => match decode_f64_le(&mut reader) {
                    Ok(value) => sim_time = value,
                    Err(codec_error) => {
                        warn!("dropping MTR sim_time parameter: {}", codec_error);
                        dropped += 1;
                    }
                },
                PARAMETER_SCENARIO_TIME => match decode_f64_le(&mut reader) {
                    Ok(value) => scenario_time = value,
                    Err(codec_error) => {
                        warn!("dropping MTR scenario_time parameter: {}", codec_error);
                        dropped += 1;
                    }
                },
                PARAMETER_CTE_TIME => match decode_f64_le(&mut reader) {
                    Ok(value) => cte_time = value,
                    Err(codec_error) => {
                        warn!("dropping MTR cte_time parameter: {}", codec_error);
                        dropped += 1;
                    }
                },
                unknown => {
                    warn!("dropping unknown MTR parameter index {}", unknown);
                    dropped += 1;
                }
            }
        }

        let execution_mode = execution_mode.ok_or(ExecutionError::MtrMissingMode)?;
        Ok((
            Self {
                execution_mode,
                sim_time,
                scenario_time,
                cte_time,
            },
            dropped,
        ))
    }
}

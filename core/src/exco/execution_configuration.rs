use fedlink_codec::{
    decode_f64_le, decode_i16_le, decode_i64_le, decode_unicode_string, encode_f64_le,
    encode_i16_le, encode_i64_le, encode_unicode_string, ByteReader, ByteWriter, CodecError,
    Encoding,
};

use crate::{
    execution::mode::ExecutionMode,
    object::{
        attribute::{AttributeBinding, AttributeConfig},
        error::ObjectError,
        object_instance::{DataRecord, ObjectInstance},
    },
    time::{base_time::BaseTime, logical_time::LogicalTime},
};

/// Attribute order on the wire, fixed by the FOM.
const ATTRIBUTE_ROOT_FRAME_NAME: i32 = 0;
const ATTRIBUTE_SCENARIO_TIME_EPOCH: i32 = 1;
const ATTRIBUTE_NEXT_MODE_SCENARIO_TIME: i32 = 2;
const ATTRIBUTE_NEXT_MODE_CTE_TIME: i32 = 3;
const ATTRIBUTE_CURRENT_EXECUTION_MODE: i32 = 4;
const ATTRIBUTE_NEXT_EXECUTION_MODE: i32 = 5;
const ATTRIBUTE_LEAST_COMMON_TIME_STEP: i32 = 6;
const ATTRIBUTE_BASE_TIME_MULTIPLIER: i32 = 7;

/// One decoded view of the replicated execution configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExcoSnapshot {
    pub root_frame_name: String,
    pub scenario_time_epoch: f64,
    pub next_mode_scenario_time: f64,
    pub next_mode_cte_time: f64,
    pub current_execution_mode: ExecutionMode,
    pub next_execution_mode: ExecutionMode,
    pub least_common_time_step: LogicalTime,
    pub hla_base_time_multiplier: i64,
}

impl Default for ExcoSnapshot {
    fn default() -> Self {
        Self {
            root_frame_name: String::new(),
            scenario_time_epoch: 0.0,
            next_mode_scenario_time: 0.0,
            next_mode_cte_time: 0.0,
            current_execution_mode: ExecutionMode::Uninitialized,
            next_execution_mode: ExecutionMode::Uninitialized,
            least_common_time_step: LogicalTime::ZERO,
            hla_base_time_multiplier: 0,
        }
    }
}

/// The ExCO record bound to its object instance. The master packs and
/// publishes it; every other federate unpacks reflections into the local
/// snapshot and hands them to the state machine.
pub struct ExecutionConfiguration {
    snapshot: ExcoSnapshot,
    updated: bool,
}

impl ExecutionConfiguration {
    pub const OBJECT_CLASS: &'static str = "ExecutionConfiguration";
    pub const INSTANCE_NAME: &'static str = "ExCO";

    pub fn new(base_time: &BaseTime) -> Self {
        Self {
            snapshot: ExcoSnapshot {
                hla_base_time_multiplier: base_time.multiplier(),
                ..ExcoSnapshot::default()
            },
            updated: false,
        }
    }

    /// The binding table, in wire order. All eight attributes travel in
    /// the initialization-and-intermittent set.
    pub fn bindings() -> Vec<AttributeBinding> {
        vec![
            AttributeBinding::new(
                "root_frame_name",
                "snapshot.root_frame_name",
                AttributeConfig::InitializeIntermittent,
                Encoding::Unicode,
            ),
            AttributeBinding::new(
                "scenario_time_epoch",
                "snapshot.scenario_time_epoch",
                AttributeConfig::InitializeIntermittent,
                Encoding::LittleEndian,
            ),
            AttributeBinding::new(
                "next_mode_scenario_time",
                "snapshot.next_mode_scenario_time",
                AttributeConfig::InitializeIntermittent,
                Encoding::LittleEndian,
            ),
            AttributeBinding::new(
                "next_mode_cte_time",
                "snapshot.next_mode_cte_time",
                AttributeConfig::InitializeIntermittent,
                Encoding::LittleEndian,
            ),
            AttributeBinding::new(
                "current_execution_mode",
                "snapshot.current_execution_mode",
                AttributeConfig::InitializeIntermittent,
                Encoding::LittleEndian,
            ),
            AttributeBinding::new(
                "next_execution_mode",
                "snapshot.next_execution_mode",
                AttributeConfig::InitializeIntermittent,
                Encoding::LittleEndian,
            ),
            AttributeBinding::new(
                "least_common_time_step",
                "snapshot.least_common_time_step",
                AttributeConfig::InitializeIntermittent,
                Encoding::LittleEndian,
            ),
            AttributeBinding::new(
                "hla_base_time_multiplier",
                "snapshot.hla_base_time_multiplier",
                AttributeConfig::InitializeIntermittent,
                Encoding::LittleEndian,
            ),
        ]
    }

    pub fn snapshot(&self) -> &ExcoSnapshot {
        &self.snapshot
    }

    pub fn snapshot_mut(&mut self) -> &mut ExcoSnapshot {
        &mut self.snapshot
    }

    /// Whether `unpack` consumed a fresh reflection since the last call to
    /// `take_updated`.
    pub fn take_updated(&mut self) -> bool {
        std::mem::replace(&mut self.updated, false)
    }

    fn decode_mode(fom_name: &str, raw: i16) -> Result<ExecutionMode, ObjectError> {
        ExecutionMode::try_from(raw).map_err(|_| ObjectError::DecodeFailed {
            fom_name: fom_name.to_string(),
            source: CodecError::ValueOutOfRange {
                encoding: "HLAinteger16LE execution mode",
            },
        })
    }

    fn store(
        object: &ObjectInstance,
        index: i32,
        writer: ByteWriter,
    ) -> Result<(), ObjectError> {
        object.with_attribute(index, |attribute| attribute.store_encoded(writer.to_bytes()))?
    }
}

impl DataRecord for ExecutionConfiguration {
    /// Encode the working snapshot into the attribute buffers, one wire
    /// value per binding.
    fn pack(&mut self, object: &ObjectInstance) -> Result<(), ObjectError> {
        let snapshot = &self.snapshot;

        let mut writer = ByteWriter::new();
        encode_unicode_string(&mut writer, &snapshot.root_frame_name).map_err(|source| {
            ObjectError::DecodeFailed {
                fom_name: "root_frame_name".to_string(),
                source,
            }
        })?;
        Self::store(object, ATTRIBUTE_ROOT_FRAME_NAME, writer)?;

        for (index, value) in [
            (ATTRIBUTE_SCENARIO_TIME_EPOCH, snapshot.scenario_time_epoch),
            (
                ATTRIBUTE_NEXT_MODE_SCENARIO_TIME,
                snapshot.next_mode_scenario_time,
            ),
            (ATTRIBUTE_NEXT_MODE_CTE_TIME, snapshot.next_mode_cte_time),
        ] {
            let mut writer = ByteWriter::with_capacity(8);
            encode_f64_le(&mut writer, value);
            Self::store(object, index, writer)?;
        }

        for (index, mode) in [
            (
                ATTRIBUTE_CURRENT_EXECUTION_MODE,
                snapshot.current_execution_mode,
            ),
            (ATTRIBUTE_NEXT_EXECUTION_MODE, snapshot.next_execution_mode),
        ] {
            let mut writer = ByteWriter::with_capacity(2);
            encode_i16_le(&mut writer, mode.as_i16());
            Self::store(object, index, writer)?;
        }

        for (index, value) in [
            (
                ATTRIBUTE_LEAST_COMMON_TIME_STEP,
                snapshot.least_common_time_step.ticks(),
            ),
            (
                ATTRIBUTE_BASE_TIME_MULTIPLIER,
                snapshot.hla_base_time_multiplier,
            ),
        ] {
            let mut writer = ByteWriter::with_capacity(8);
            encode_i64_le(&mut writer, value);
            Self::store(object, index, writer)?;
        }

        Ok(())
    }

    /// Decode every received attribute buffer into the snapshot, clearing
    /// the received flags as each value is consumed.
    fn unpack(&mut self, object: &ObjectInstance) -> Result<(), ObjectError> {
        let mut consumed_any = false;

        for index in 0..object.attribute_count() as i32 {
            let pending = object.with_attribute(index, |attribute| {
                if attribute.is_locally_owned() || !attribute.is_received() {
                    None
                } else {
                    Some((attribute.binding().fom_name.clone(), attribute.encoded()))
                }
            })?;
            let Some((fom_name, encoded)) = pending else {
                continue;
            };
            let encoded = encoded?;
            let mut reader = ByteReader::new(&encoded);

            let decode_result: Result<(), CodecError> = match index {
                ATTRIBUTE_ROOT_FRAME_NAME => decode_unicode_string(&mut reader)
                    .map(|value| self.snapshot.root_frame_name = value),
                ATTRIBUTE_SCENARIO_TIME_EPOCH => decode_f64_le(&mut reader)
                    .map(|value| self.snapshot.scenario_time_epoch = value),
                ATTRIBUTE_NEXT_MODE_SCENARIO_TIME => decode_f64_le(&mut reader)
                    .map(|value| self.snapshot.next_mode_scenario_time = value),
                ATTRIBUTE_NEXT_MODE_CTE_TIME => decode_f64_le(&mut reader)
                    .map(|value| self.snapshot.next_mode_cte_time = value),
                ATTRIBUTE_CURRENT_EXECUTION_MODE => match decode_i16_le(&mut reader) {
                    Ok(raw) => {
                        self.snapshot.current_execution_mode = Self::decode_mode(&fom_name, raw)?;
                        Ok(())
                    }
                    Err(source) => Err(source),
                },
                ATTRIBUTE_NEXT_EXECUTION_MODE => match decode_i16_le(&mut reader) {
                    Ok(raw) => {
                        self.snapshot.next_execution_mode = Self::decode_mode(&fom_name, raw)?;
                        Ok(())
                    }
                    Err(source) => Err(source),
                },
                ATTRIBUTE_LEAST_COMMON_TIME_STEP => decode_i64_le(&mut reader).map(|value| {
                    self.snapshot.least_common_time_step = LogicalTime::from_ticks(value)
                }),
                ATTRIBUTE_BASE_TIME_MULTIPLIER => decode_i64_le(&mut reader)
                    .map(|value| self.snapshot.hla_base_time_multiplier = value),
                _ => Ok(()),
            };

            decode_result.map_err(|source| ObjectError::DecodeFailed { fom_name, source })?;

            object.with_attribute(index, |attribute| attribute.clear_received())?;
            consumed_any = true;
        }

        if consumed_any {
            self.updated = true;
        }
        Ok(())
    }
}

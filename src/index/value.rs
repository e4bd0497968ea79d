//! Index records and their binary codec.
//!
//! A record stores only the source declaration's qualified name; the data
//! type is implied by the reader that decodes it. On the wire a record is a
//! `u32` big-endian byte length followed by the UTF-8 name.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

use super::data_type::RelationDataType;
use super::error::{IndexError, Result};
use crate::base::QualifiedName;

/// "Declaration `source_fq_name` references the keyed class through
/// `data_type`."
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexValue {
    data_type: RelationDataType,
    source_fq_name: QualifiedName,
}

impl IndexValue {
    pub fn new(data_type: RelationDataType, source_fq_name: impl Into<QualifiedName>) -> Self {
        Self {
            data_type,
            source_fq_name: source_fq_name.into(),
        }
    }

    pub fn data_type(&self) -> RelationDataType {
        self.data_type
    }

    pub fn source_fq_name(&self) -> &QualifiedName {
        &self.source_fq_name
    }

    /// Write the payload. The data type is not written.
    pub fn save<W: Write>(&self, out: &mut W) -> Result<()> {
        let bytes = self.source_fq_name.as_bytes();
        let len = u32::try_from(bytes.len()).map_err(|_| {
            IndexError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "qualified name too long",
            ))
        })?;
        out.write_u32::<BigEndian>(len)?;
        out.write_all(bytes)?;
        Ok(())
    }

    /// Read a payload written by [`IndexValue::save`] for `data_type`.
    pub fn read<R: Read>(data_type: RelationDataType, input: &mut R) -> Result<Self> {
        reader_for(data_type).read(input)
    }
}

// ============================================================================
// READERS
// ============================================================================

/// Decodes payloads of one data type.
#[derive(Debug, Clone, Copy)]
pub struct IndexValueReader {
    pub supported_type: RelationDataType,
    factory: fn(QualifiedName) -> IndexValue,
}

impl IndexValueReader {
    pub fn read<R: Read>(&self, input: &mut R) -> Result<IndexValue> {
        let len = input.read_u32::<BigEndian>()? as usize;
        let mut bytes = Vec::new();
        input.take(len as u64).read_to_end(&mut bytes)?;
        if bytes.len() != len {
            return Err(IndexError::truncated(len, bytes.len()));
        }
        let name = String::from_utf8(bytes)?;
        Ok((self.factory)(QualifiedName::from(name)))
    }
}

const fn reader(
    supported_type: RelationDataType,
    factory: fn(QualifiedName) -> IndexValue,
) -> IndexValueReader {
    IndexValueReader {
        supported_type,
        factory,
    }
}

/// One reader per data type, in id order.
pub static READERS: [IndexValueReader; RelationDataType::COUNT] = [
    reader(RelationDataType::ComponentWithModule, |name| {
        IndexValue::new(RelationDataType::ComponentWithModule, name)
    }),
    reader(RelationDataType::ComponentWithDependency, |name| {
        IndexValue::new(RelationDataType::ComponentWithDependency, name)
    }),
    reader(RelationDataType::SubcomponentWithModule, |name| {
        IndexValue::new(RelationDataType::SubcomponentWithModule, name)
    }),
    reader(RelationDataType::ModuleWithInclude, |name| {
        IndexValue::new(RelationDataType::ModuleWithInclude, name)
    }),
    reader(RelationDataType::ModuleWithSubcomponent, |name| {
        IndexValue::new(RelationDataType::ModuleWithSubcomponent, name)
    }),
];

pub fn reader_for(data_type: RelationDataType) -> &'static IndexValueReader {
    &READERS[usize::from(data_type.id())]
}

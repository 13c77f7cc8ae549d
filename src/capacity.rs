//! Static (version, EC level) -> capacity lookup, loaded once from an
//! embedded whitespace-delimited text resource (see `capacity_table.txt`).
//!
//! File grammar: one record per line, `version ec_level data_codewords
//! ec_per_block b1 d1 [b2 d2]`, with `ec_level` coded M=0, L=1, H=2, Q=3.
//! Lines that don't parse to 6 or 8 integer fields are skipped with a
//! warning; this mirrors how the reference implementation's data
//! specification loader treats malformed lines in its own text resource.

use std::sync::OnceLock;

use crate::error::QrError;
use crate::mode::EcLevel;

const CAPACITY_TABLE_SRC: &str = include_str!("capacity_table.txt");

/// One (block_count, data_codewords_per_block) group within a version/EC
/// combination's block layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGroup {
    pub block_count: u16,
    pub data_per_block: u16,
}

#[derive(Debug, Clone, Copy)]
pub struct CapacityRecord {
    pub data_codewords: u16,
    pub ec_per_block: u8,
    pub groups: (BlockGroup, Option<BlockGroup>),
}

impl CapacityRecord {
    pub fn total_blocks(&self) -> u16 {
        self.groups.0.block_count + self.groups.1.map_or(0, |g| g.block_count)
    }

    pub fn total_codewords(&self) -> usize {
        self.data_codewords as usize + self.ec_per_block as usize * self.total_blocks() as usize
    }
}

pub struct CapacityTable {
    records: std::collections::HashMap<(u8, EcLevel), CapacityRecord>,
}

impl CapacityTable {
    fn parse(src: &str) -> Result<Self, QrError> {
        let mut records = std::collections::HashMap::new();

        for (lineno, line) in src.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Some((version, ec_level, record)) => {
                    records.insert((version, ec_level), record);
                }
                None => {
                    log::warn!("capacity table: skipping malformed line {}: {line:?}", lineno + 1);
                }
            }
        }

        if records.is_empty() {
            return Err(QrError::TableLoadError(
                "capacity table resource contained no usable records".into(),
            ));
        }

        Ok(CapacityTable { records })
    }

    pub fn lookup(&self, version: u8, ec_level: EcLevel) -> Result<CapacityRecord, QrError> {
        self.records
            .get(&(version, ec_level))
            .copied()
            .ok_or(QrError::CapacityUnavailable { version, ec_level })
    }
}

fn parse_line(line: &str) -> Option<(u8, EcLevel, CapacityRecord)> {
    let fields: Vec<i64> = line.split_whitespace().map(|f| f.parse().ok()).collect::<Option<_>>()?;
    if fields.len() != 6 && fields.len() != 8 {
        return None;
    }

    let version = u8::try_from(fields[0]).ok()?;
    let ec_level = EcLevel::from_wire(u8::try_from(fields[1]).ok()?)?;
    let data_codewords = u16::try_from(fields[2]).ok()?;
    let ec_per_block = u8::try_from(fields[3]).ok()?;
    let group1 = BlockGroup {
        block_count: u16::try_from(fields[4]).ok()?,
        data_per_block: u16::try_from(fields[5]).ok()?,
    };
    let group2 = if fields.len() == 8 {
        Some(BlockGroup {
            block_count: u16::try_from(fields[6]).ok()?,
            data_per_block: u16::try_from(fields[7]).ok()?,
        })
    } else {
        None
    };

    Some((
        version,
        ec_level,
        CapacityRecord {
            data_codewords,
            ec_per_block,
            groups: (group1, group2),
        },
    ))
}

static TABLE: OnceLock<CapacityTable> = OnceLock::new();

pub fn table() -> &'static CapacityTable {
    TABLE.get_or_init(|| {
        CapacityTable::parse(CAPACITY_TABLE_SRC).expect("embedded capacity table must parse")
    })
}

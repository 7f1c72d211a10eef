// src/extractors/records.rs
use serde::Serialize;
use std::fmt;

/// A record type with a fixed, ordered column set.
///
/// Serde field names must match `COLUMNS` one for one and in the same order;
/// the CSV header is written from the serialized field names.
pub trait TabularRecord: Serialize {
    const COLUMNS: &'static [&'static str];
}

/// Line in the development-expenditure object-class summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjekAmRecord {
    #[serde(rename = "MP")]
    pub mp: String,
    #[serde(rename = "Kod")]
    pub code: String,
    #[serde(rename = "Maksud Perbelanjaan")]
    pub title: String,
    #[serde(rename = "Jenis Perbelanjaan")]
    pub expenditure_type: String,
    #[serde(rename = "Anggaran")]
    pub estimate: String,
}

impl TabularRecord for ObjekAmRecord {
    const COLUMNS: &'static [&'static str] = &[
        "MP",
        "Kod",
        "Maksud Perbelanjaan",
        "Jenis Perbelanjaan",
        "Anggaran",
    ];
}

/// Line in a development-project ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevelopmentRecord {
    #[serde(rename = "MP")]
    pub mp: String,
    #[serde(rename = "Maksud Perbelanjaan")]
    pub title: String,
    #[serde(rename = "Butiran")]
    pub item_code: String,
    #[serde(rename = "Tajuk")]
    pub heading: String,
    #[serde(rename = "Jumlah Anggaran Harga Projek")]
    pub project_estimate: String,
    #[serde(rename = "Cara Langsung")]
    pub direct_method: String,
    #[serde(rename = "Pinjaman")]
    pub loan: String,
}

impl TabularRecord for DevelopmentRecord {
    const COLUMNS: &'static [&'static str] = &[
        "MP",
        "Maksud Perbelanjaan",
        "Butiran",
        "Tajuk",
        "Jumlah Anggaran Harga Projek",
        "Cara Langsung",
        "Pinjaman",
    ];
}

/// Object-class ("Objek Am") codes recognised in operating-budget ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectClass {
    #[serde(rename = "10000")]
    Emoluments,
    #[serde(rename = "20000")]
    SuppliesAndServices,
    #[serde(rename = "30000")]
    AssetAcquisition,
    #[serde(rename = "40000")]
    FixedCharges,
    #[serde(rename = "50000")]
    OtherExpenditure,
}

impl ObjectClass {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "10000" => Some(Self::Emoluments),
            "20000" => Some(Self::SuppliesAndServices),
            "30000" => Some(Self::AssetAcquisition),
            "40000" => Some(Self::FixedCharges),
            "50000" => Some(Self::OtherExpenditure),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Emoluments => "10000",
            Self::SuppliesAndServices => "20000",
            Self::AssetAcquisition => "30000",
            Self::FixedCharges => "40000",
            Self::OtherExpenditure => "50000",
        }
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Line in a program/activity operating-budget ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatingRecord {
    #[serde(rename = "MP")]
    pub mp: String,
    #[serde(rename = "Maksud Perbelanjaan")]
    pub title: String,
    #[serde(rename = "Kod Program")]
    pub program_code: String,
    #[serde(rename = "Program")]
    pub program_name: String,
    #[serde(rename = "Kod Aktiviti")]
    pub activity_code: String,
    #[serde(rename = "Aktiviti")]
    pub activity_name: String,
    #[serde(rename = "Objek Am")]
    pub object_class: ObjectClass,
    #[serde(rename = "Anggaran 2014")]
    pub estimate_year1: String,
    #[serde(rename = "Anggaran 2015")]
    pub estimate_year2: String,
    #[serde(rename = "Bil. Jawatan 2014")]
    pub positions_year1: String,
    #[serde(rename = "Bil. Jawatan 2015")]
    pub positions_year2: String,
}

impl TabularRecord for OperatingRecord {
    const COLUMNS: &'static [&'static str] = &[
        "MP",
        "Maksud Perbelanjaan",
        "Kod Program",
        "Program",
        "Kod Aktiviti",
        "Aktiviti",
        "Objek Am",
        "Anggaran 2014",
        "Anggaran 2015",
        "Bil. Jawatan 2014",
        "Bil. Jawatan 2015",
    ];
}

/// Records of one document bound to their column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTable<R: TabularRecord> {
    pub mp: String,
    pub records: Vec<R>,
}

impl<R: TabularRecord> RecordTable<R> {
    /// `None` when there is nothing to write.
    pub fn build(mp: &str, records: Vec<R>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        Some(Self {
            mp: mp.to_string(),
            records,
        })
    }

    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

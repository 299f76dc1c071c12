use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Student national identification number, the primary student key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nisn(pub String);

impl Nisn {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nisn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Roster record for a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub nisn: Nisn,
    pub nama: String,
    pub kelas: String,
    #[serde(default)]
    pub walas: Option<String>,
}

/// The seven tracked habit categories, in report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HabitCategory {
    BangunPagi,
    Tidur,
    Beribadah,
    MakanSehat,
    Olahraga,
    Belajar,
    Bermasyarakat,
}

impl HabitCategory {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::BangunPagi,
            Self::Tidur,
            Self::Beribadah,
            Self::MakanSehat,
            Self::Olahraga,
            Self::Belajar,
            Self::Bermasyarakat,
        ]
    }

    /// Field name used for the block inside a daily entry.
    pub const fn key(self) -> &'static str {
        match self {
            Self::BangunPagi => "bangunPagi",
            Self::Tidur => "tidur",
            Self::Beribadah => "beribadah",
            Self::MakanSehat => "makanSehat",
            Self::Olahraga => "olahraga",
            Self::Belajar => "belajar",
            Self::Bermasyarakat => "bermasyarakat",
        }
    }

    /// URL-friendly name used by the per-category summary routes.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::BangunPagi => "bangun-pagi",
            Self::Tidur => "tidur",
            Self::Beribadah => "beribadah",
            Self::MakanSehat => "makan-sehat",
            Self::Olahraga => "olahraga",
            Self::Belajar => "belajar",
            Self::Bermasyarakat => "bermasyarakat",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BangunPagi => "Bangun Pagi",
            Self::Tidur => "Tidur Cepat",
            Self::Beribadah => "Beribadah",
            Self::MakanSehat => "Makan Sehat dan Bergizi",
            Self::Olahraga => "Berolahraga",
            Self::Belajar => "Gemar Belajar",
            Self::Bermasyarakat => "Bermasyarakat",
        }
    }
}

impl fmt::Display for HabitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown habit category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for HabitCategory {
    type Err = UnknownCategory;

    /// Accepts either the slug (`bangun-pagi`) or the entry key (`bangunPagi`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|category| {
                category.slug().eq_ignore_ascii_case(trimmed)
                    || category.key().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}

/// Sub-indicators rated independently inside the `beribadah` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeribadahIndicator {
    BerdoaUntukDiriDanOrtu,
    SholatFajar,
    SholatLimaWaktuBerjamaah,
    ZikirSesudahSholat,
    SholatDhuha,
    SholatSunahRawatib,
    ZakatInfaqSedekah,
}

impl BeribadahIndicator {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::BerdoaUntukDiriDanOrtu,
            Self::SholatFajar,
            Self::SholatLimaWaktuBerjamaah,
            Self::ZikirSesudahSholat,
            Self::SholatDhuha,
            Self::SholatSunahRawatib,
            Self::ZakatInfaqSedekah,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::BerdoaUntukDiriDanOrtu => "berdoaUntukDiriDanOrtu",
            Self::SholatFajar => "sholatFajar",
            Self::SholatLimaWaktuBerjamaah => "sholatLimaWaktuBerjamaah",
            Self::ZikirSesudahSholat => "zikirSesudahSholat",
            Self::SholatDhuha => "sholatDhuha",
            Self::SholatSunahRawatib => "sholatSunahRawatib",
            Self::ZakatInfaqSedekah => "zakatInfaqSedekah",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BerdoaUntukDiriDanOrtu => "Berdoa untuk Diri dan Orang Tua",
            Self::SholatFajar => "Sholat Fajar",
            Self::SholatLimaWaktuBerjamaah => "Sholat 5 Waktu Berjamaah",
            Self::ZikirSesudahSholat => "Zikir Sesudah Sholat",
            Self::SholatDhuha => "Sholat Dhuha",
            Self::SholatSunahRawatib => "Sholat Sunah Rawatib",
            Self::ZakatInfaqSedekah => "Zakat/Infaq/Sedekah",
        }
    }
}

/// Sub-indicators rated independently inside the `belajar` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BelajarIndicator {
    MembacaKitabSuci,
    MembacaBukuBacaan,
    MembacaBukuPelajaran,
    MengerjakanTugas,
}

impl BelajarIndicator {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::MembacaKitabSuci,
            Self::MembacaBukuBacaan,
            Self::MembacaBukuPelajaran,
            Self::MengerjakanTugas,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::MembacaKitabSuci => "membaca-kitab-suci",
            Self::MembacaBukuBacaan => "membaca-buku-bacaan",
            Self::MembacaBukuPelajaran => "membaca-buku-pelajaran",
            Self::MengerjakanTugas => "mengerjakan-tugas",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MembacaKitabSuci => "Membaca Kitab Suci",
            Self::MembacaBukuBacaan => "Membaca Buku Bacaan",
            Self::MembacaBukuPelajaran => "Membaca Buku Pelajaran",
            Self::MengerjakanTugas => "Mengerjakan Tugas",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BangunPagi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jam: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membaca_dan_bangun_tidur: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merapikan_tempat_tidur: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tidur {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jam: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub berdoa_sebelum_tidur: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beribadah {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub berdoa_untuk_diri_dan_ortu: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sholat_fajar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sholat_lima_waktu_berjamaah: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zikir_sesudah_sholat: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sholat_dhuha: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sholat_sunah_rawatib: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zakat_infaq_sedekah: Option<bool>,
}

impl Beribadah {
    pub fn indicator(&self, indicator: BeribadahIndicator) -> Option<bool> {
        match indicator {
            BeribadahIndicator::BerdoaUntukDiriDanOrtu => self.berdoa_untuk_diri_dan_ortu,
            BeribadahIndicator::SholatFajar => self.sholat_fajar,
            BeribadahIndicator::SholatLimaWaktuBerjamaah => self.sholat_lima_waktu_berjamaah,
            BeribadahIndicator::ZikirSesudahSholat => self.zikir_sesudah_sholat,
            BeribadahIndicator::SholatDhuha => self.sholat_dhuha,
            BeribadahIndicator::SholatSunahRawatib => self.sholat_sunah_rawatib,
            BeribadahIndicator::ZakatInfaqSedekah => self.zakat_infaq_sedekah,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakanSehat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jenis_makanan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub makan_sayur_atau_buah: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Olahraga {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jenis_olahraga: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waktu: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Belajar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membaca_kitab_suci: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membaca_buku_bacaan: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membaca_buku_pelajaran: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mengerjakan_tugas: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
}

impl Belajar {
    pub fn indicator(&self, indicator: BelajarIndicator) -> Option<bool> {
        match indicator {
            BelajarIndicator::MembacaKitabSuci => self.membaca_kitab_suci,
            BelajarIndicator::MembacaBukuBacaan => self.membaca_buku_bacaan,
            BelajarIndicator::MembacaBukuPelajaran => self.membaca_buku_pelajaran,
            BelajarIndicator::MengerjakanTugas => self.mengerjakan_tugas,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bermasyarakat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waktu: Option<String>,
}

/// One student's submission for one calendar day. Blocks are filled in
/// incrementally, so any of them may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub nisn: Nisn,
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub kelas: String,
    pub tanggal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bangun_pagi: Option<BangunPagi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tidur: Option<Tidur>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beribadah: Option<Beribadah>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub makan_sehat: Option<MakanSehat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub olahraga: Option<Olahraga>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belajar: Option<Belajar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bermasyarakat: Option<Bermasyarakat>,
}

impl DailyEntry {
    pub fn new(nisn: impl Into<String>, tanggal: impl Into<String>) -> Self {
        Self {
            nisn: Nisn::new(nisn),
            nama: String::new(),
            kelas: String::new(),
            tanggal: tanggal.into(),
            bangun_pagi: None,
            tidur: None,
            beribadah: None,
            makan_sehat: None,
            olahraga: None,
            belajar: None,
            bermasyarakat: None,
        }
    }

    /// Copy of the block recorded for `category`, if the student filled it in.
    pub fn block(&self, category: HabitCategory) -> Option<HabitBlock> {
        match category {
            HabitCategory::BangunPagi => self.bangun_pagi.clone().map(HabitBlock::BangunPagi),
            HabitCategory::Tidur => self.tidur.clone().map(HabitBlock::Tidur),
            HabitCategory::Beribadah => self.beribadah.clone().map(HabitBlock::Beribadah),
            HabitCategory::MakanSehat => self.makan_sehat.clone().map(HabitBlock::MakanSehat),
            HabitCategory::Olahraga => self.olahraga.clone().map(HabitBlock::Olahraga),
            HabitCategory::Belajar => self.belajar.clone().map(HabitBlock::Belajar),
            HabitCategory::Bermasyarakat => {
                self.bermasyarakat.clone().map(HabitBlock::Bermasyarakat)
            }
        }
    }
}

/// A single habit block, tagged by category. Serializes as the bare block
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HabitBlock {
    BangunPagi(BangunPagi),
    Tidur(Tidur),
    Beribadah(Beribadah),
    MakanSehat(MakanSehat),
    Olahraga(Olahraga),
    Belajar(Belajar),
    Bermasyarakat(Bermasyarakat),
}

impl HabitBlock {
    pub fn category(&self) -> HabitCategory {
        match self {
            HabitBlock::BangunPagi(_) => HabitCategory::BangunPagi,
            HabitBlock::Tidur(_) => HabitCategory::Tidur,
            HabitBlock::Beribadah(_) => HabitCategory::Beribadah,
            HabitBlock::MakanSehat(_) => HabitCategory::MakanSehat,
            HabitBlock::Olahraga(_) => HabitCategory::Olahraga,
            HabitBlock::Belajar(_) => HabitCategory::Belajar,
            HabitBlock::Bermasyarakat(_) => HabitCategory::Bermasyarakat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_from_slug_and_key() {
        assert_eq!(
            "bangun-pagi".parse::<HabitCategory>(),
            Ok(HabitCategory::BangunPagi)
        );
        assert_eq!(
            "makanSehat".parse::<HabitCategory>(),
            Ok(HabitCategory::MakanSehat)
        );
        assert_eq!(
            " Bermasyarakat ".parse::<HabitCategory>(),
            Ok(HabitCategory::Bermasyarakat)
        );
        assert!("menyanyi".parse::<HabitCategory>().is_err());
    }

    #[test]
    fn daily_entry_reads_camel_case_json_with_partial_blocks() {
        let entry: DailyEntry = serde_json::from_value(serde_json::json!({
            "nisn": "0012345678",
            "nama": "Siti Aminah",
            "kelas": "7A",
            "tanggal": "2025-03-10",
            "bangunPagi": { "jam": "04:30", "membacaDanBangunTidur": true },
            "beribadah": { "sholatFajar": true, "sholatDhuha": false }
        }))
        .expect("entry deserializes");

        assert_eq!(entry.nisn.as_str(), "0012345678");
        assert_eq!(
            entry.bangun_pagi.as_ref().and_then(|b| b.membaca_dan_bangun_tidur),
            Some(true)
        );
        let beribadah = entry.beribadah.as_ref().expect("beribadah block");
        assert_eq!(
            beribadah.indicator(BeribadahIndicator::SholatFajar),
            Some(true)
        );
        assert_eq!(
            beribadah.indicator(BeribadahIndicator::SholatDhuha),
            Some(false)
        );
        assert_eq!(beribadah.indicator(BeribadahIndicator::ZakatInfaqSedekah), None);
        assert!(entry.block(HabitCategory::Tidur).is_none());
    }

    #[test]
    fn block_view_serializes_raw_fields_only() {
        let mut entry = DailyEntry::new("1", "2025-03-10");
        entry.olahraga = Some(Olahraga {
            jenis_olahraga: Some("Lari".to_string()),
            deskripsi: None,
            waktu: Some("06:00".to_string()),
        });

        let block = entry.block(HabitCategory::Olahraga).expect("block present");
        assert_eq!(block.category(), HabitCategory::Olahraga);
        let json = serde_json::to_value(block).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({ "jenisOlahraga": "Lari", "waktu": "06:00" })
        );
    }
}

use super::super::dates::MonthKey;
use super::super::domain::{BelajarIndicator, BeribadahIndicator, HabitCategory, Student};
use super::super::evaluation::{rating_or_default, IndicatorBundle, MIN_RATING};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// One scored column of the final assessment sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorColumn {
    pub category: HabitCategory,
    pub component: Option<&'static str>,
    pub header: &'static str,
}

const fn atomic(category: HabitCategory) -> IndicatorColumn {
    IndicatorColumn {
        category,
        component: None,
        header: category.label(),
    }
}

const fn beribadah(indicator: BeribadahIndicator) -> IndicatorColumn {
    IndicatorColumn {
        category: HabitCategory::Beribadah,
        component: Some(indicator.key()),
        header: indicator.label(),
    }
}

const fn belajar(indicator: BelajarIndicator) -> IndicatorColumn {
    IndicatorColumn {
        category: HabitCategory::Belajar,
        component: Some(indicator.key()),
        header: indicator.label(),
    }
}

pub const INDICATOR_COLUMNS: [IndicatorColumn; 16] = [
    atomic(HabitCategory::BangunPagi),
    atomic(HabitCategory::Tidur),
    beribadah(BeribadahIndicator::BerdoaUntukDiriDanOrtu),
    beribadah(BeribadahIndicator::SholatFajar),
    beribadah(BeribadahIndicator::SholatLimaWaktuBerjamaah),
    beribadah(BeribadahIndicator::ZikirSesudahSholat),
    beribadah(BeribadahIndicator::SholatDhuha),
    beribadah(BeribadahIndicator::SholatSunahRawatib),
    beribadah(BeribadahIndicator::ZakatInfaqSedekah),
    atomic(HabitCategory::MakanSehat),
    atomic(HabitCategory::Olahraga),
    belajar(BelajarIndicator::MembacaKitabSuci),
    belajar(BelajarIndicator::MembacaBukuBacaan),
    belajar(BelajarIndicator::MembacaBukuPelajaran),
    belajar(BelajarIndicator::MengerjakanTugas),
    atomic(HabitCategory::Bermasyarakat),
];

const IDENTITY_HEADERS: [&str; 4] = ["No", "NISN", "Nama", "Kelas"];
const TOTAL_HEADERS: [&str; 2] = ["Nilai Perolehan", "Nilai Akhir"];

/// Total number of columns in the sheet.
pub const COLUMN_COUNT: usize =
    IDENTITY_HEADERS.len() + INDICATOR_COLUMNS.len() + TOTAL_HEADERS.len();

pub fn header_row() -> Vec<&'static str> {
    IDENTITY_HEADERS
        .iter()
        .copied()
        .chain(INDICATOR_COLUMNS.iter().map(|column| column.header))
        .chain(TOTAL_HEADERS.iter().copied())
        .collect()
}

/// Flattened, scored row for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub no: usize,
    pub nisn: String,
    pub nama: String,
    pub kelas: String,
    pub ratings: [u8; 16],
    pub nilai_perolehan: u32,
    pub nilai_akhir: u32,
}

impl ExportRow {
    pub fn from_bundle(no: usize, student: &Student, bundle: &IndicatorBundle, max_score: u32) -> Self {
        let mut ratings = [MIN_RATING; 16];
        for (slot, column) in ratings.iter_mut().zip(INDICATOR_COLUMNS.iter()) {
            *slot = rating_or_default(bundle, column.category, column.component, MIN_RATING);
        }

        let nilai_perolehan: u32 = ratings.iter().map(|rating| u32::from(*rating)).sum();

        Self {
            no,
            nisn: student.nisn.0.clone(),
            nama: student.nama.clone(),
            kelas: student.kelas.clone(),
            ratings,
            nilai_perolehan,
            nilai_akhir: final_score(nilai_perolehan, max_score),
        }
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(COLUMN_COUNT);
        fields.push(self.no.to_string());
        fields.push(self.nisn.clone());
        fields.push(self.nama.clone());
        fields.push(self.kelas.clone());
        fields.extend(self.ratings.iter().map(|rating| rating.to_string()));
        fields.push(self.nilai_perolehan.to_string());
        fields.push(self.nilai_akhir.to_string());
        fields
    }
}

/// `round(obtained / max_score * 100)`, rounding halves away from zero.
pub fn final_score(obtained: u32, max_score: u32) -> u32 {
    if max_score == 0 {
        return 0;
    }
    (f64::from(obtained) / f64::from(max_score) * 100.0).round() as u32
}

pub fn export_filename(generated_on: NaiveDate) -> String {
    format!("penilaian_akhir_{}.csv", generated_on.format("%Y-%m-%d"))
}

/// Rendered CSV sheet ready to be written to disk or streamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub filename: String,
    pub month: MonthKey,
    pub rows: Vec<ExportRow>,
    pub body: String,
}

/// Score every student and render the roster as CSV.
///
/// Rows are ordered by name (case and accent insensitive) and numbered after
/// sorting; students without any entries still get a row of minimum ratings.
pub fn build_export(
    month: MonthKey,
    evaluated: Vec<(Student, IndicatorBundle)>,
    max_score: u32,
    generated_on: NaiveDate,
) -> Result<ExportDocument, ExportError> {
    let mut evaluated = evaluated;
    evaluated.sort_by(|(a, _), (b, _)| compare_students(a, b));

    let rows: Vec<ExportRow> = evaluated
        .iter()
        .enumerate()
        .map(|(index, (student, bundle))| {
            ExportRow::from_bundle(index + 1, student, bundle, max_score)
        })
        .collect();

    let body = render_csv(&rows)?;

    Ok(ExportDocument {
        filename: export_filename(generated_on),
        month,
        rows,
        body,
    })
}

fn render_csv(rows: &[ExportRow]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(header_row())?;
    for row in rows {
        writer.write_record(row.fields())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    String::from_utf8(bytes).map_err(ExportError::Encoding)
}

fn compare_students(a: &Student, b: &Student) -> Ordering {
    collation_key(&a.nama)
        .cmp(&collation_key(&b.nama))
        .then_with(|| a.nama.cmp(&b.nama))
        .then_with(|| a.nisn.cmp(&b.nisn))
}

/// Lowercased name with Latin diacritics folded onto their base letter, so
/// "Élia" sorts next to "elia" instead of after "zaki". An approximation of
/// locale collation covering Latin-1 and Latin Extended-A; other scripts
/// compare by code point.
fn collation_key(name: &str) -> String {
    name.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .flat_map(fold_latin)
        .collect()
}

fn fold_latin(ch: char) -> Vec<char> {
    let base = match ch {
        'æ' => return vec!['a', 'e'],
        'œ' => return vec!['o', 'e'],
        'ß' => return vec!['s', 's'],
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' | 'ð' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    };
    vec![base]
}

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Io(std::io::Error),
    Encoding(std::string::FromUtf8Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Csv(err) => write!(f, "failed to write CSV row: {}", err),
            ExportError::Io(err) => write!(f, "failed to flush CSV output: {}", err),
            ExportError::Encoding(err) => write!(f, "CSV output is not valid UTF-8: {}", err),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Csv(err) => Some(err),
            ExportError::Io(err) => Some(err),
            ExportError::Encoding(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

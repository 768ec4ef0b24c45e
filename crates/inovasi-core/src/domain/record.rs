//! Innovation record domain types.
//!
//! These types represent rows of the `inovasi_daerah` table, independent of
//! the store that persists them. Field names are English; the serde renames
//! carry the column names used on the wire.

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};

/// Identity key assigned by the record store (`no` column).
pub type RecordKey = i64;

/// Affirmative value of the `video` flag.
pub const VIDEO_PRESENT: &str = "Ada";

/// Negative value of the `video` flag.
pub const VIDEO_ABSENT: &str = "Tidak";

/// Separator used to join `related_affairs` into a single column.
pub const RELATED_AFFAIRS_SEPARATOR: &str = ", ";

/// Default region for newly created records.
pub const DEFAULT_REGION: &str = "Provinsi Jawa Timur";

/// Default maturity score for newly created records.
pub const DEFAULT_MATURITY: f64 = 50.0;

/// Default maturity label for newly created records.
pub const DEFAULT_MATURITY_LABEL: &str = "Inovatif";

/// Default coordinates for newly created records (Surabaya).
pub const DEFAULT_COORDINATES: (f64, f64) = (-7.2575, 112.7521);

/// Columns that come back as `null` are read as empty strings.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numeric columns that come back as `null` are read as zero.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// A persisted innovation record.
///
/// The key is assigned by the store on insert and never changes afterwards.
/// Use `NewRecord` for records that haven't been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identity key.
    #[serde(rename = "no")]
    pub key: RecordKey,
    /// Innovation title.
    #[serde(rename = "judul_inovasi", default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Regional government the innovation belongs to.
    #[serde(rename = "pemda", default, deserialize_with = "null_as_empty")]
    pub region: String,
    /// Administering unit (OPD).
    #[serde(rename = "admin_opd", default, deserialize_with = "null_as_empty")]
    pub admin_unit: String,
    /// Initiator category (e.g. "Kepala Daerah", "OPD").
    #[serde(rename = "inisiator", default, deserialize_with = "null_as_empty")]
    pub initiator: String,
    /// Name of the initiator.
    #[serde(rename = "nama_inisiator", default, deserialize_with = "null_as_empty")]
    pub initiator_name: String,
    /// Form of the innovation.
    #[serde(rename = "bentuk_inovasi", default, deserialize_with = "null_as_empty")]
    pub form: String,
    /// Kind (e.g. "Digital", "Non Digital", "Teknologi").
    #[serde(rename = "jenis", default, deserialize_with = "null_as_empty")]
    pub kind: String,
    /// Asta Cipta priority program.
    #[serde(rename = "asta_cipta", default, deserialize_with = "null_as_empty")]
    pub asta_cipta: String,
    /// Primary government affair.
    #[serde(rename = "urusan_utama", default, deserialize_with = "null_as_empty")]
    pub main_affair: String,
    /// Secondary affairs, joined with `RELATED_AFFAIRS_SEPARATOR`.
    #[serde(
        rename = "urusan_lain_yang_beririsan",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub related_affairs: String,
    /// Maturity score (0-120, enforced by the editor).
    #[serde(rename = "kematangan", default, deserialize_with = "null_as_zero")]
    pub maturity: f64,
    /// Stage (e.g. "Inisiatif", "Uji Coba", "Penerapan").
    #[serde(rename = "tahapan_inovasi", default, deserialize_with = "null_as_empty")]
    pub stage: String,
    /// Date the record was entered (`YYYY-MM-DD`).
    #[serde(rename = "tanggal_input", default, deserialize_with = "null_as_empty")]
    pub input_date: String,
    /// Date the innovation was applied.
    #[serde(rename = "tanggal_penerapan", default, deserialize_with = "null_as_empty")]
    pub applied_date: String,
    /// Date the innovation was developed.
    #[serde(
        rename = "tanggal_pengembangan",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub development_date: String,
    /// Video flag (`Ada` / `Tidak`).
    #[serde(rename = "video", default, deserialize_with = "null_as_empty")]
    pub video: String,
    /// Video URL, expected non-empty when `video` is affirmative.
    #[serde(rename = "link_video", default, deserialize_with = "null_as_empty")]
    pub video_url: String,
    /// Maturity label chosen in the editor.
    #[serde(rename = "label_kematangan", default, deserialize_with = "null_as_empty")]
    pub maturity_label: String,
    /// Latitude.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub lat: f64,
    /// Longitude.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub lon: f64,
}

impl Record {
    /// Split `related_affairs` into its individual tags.
    pub fn related_affairs_list(&self) -> Vec<String> {
        split_related_affairs(&self.related_affairs)
    }

    /// Whether the video flag is affirmative.
    pub fn has_video(&self) -> bool {
        self.video.trim().eq_ignore_ascii_case(VIDEO_PRESENT)
    }

    /// Google Maps link for the record's coordinates.
    pub fn maps_url(&self) -> String {
        format!("https://www.google.com/maps?q={},{}", self.lat, self.lon)
    }

    /// Convert this record to a `NewRecord` (drops the key).
    #[must_use]
    pub fn to_new_record(&self) -> NewRecord {
        NewRecord {
            title: self.title.clone(),
            region: self.region.clone(),
            admin_unit: self.admin_unit.clone(),
            initiator: self.initiator.clone(),
            initiator_name: self.initiator_name.clone(),
            form: self.form.clone(),
            kind: self.kind.clone(),
            asta_cipta: self.asta_cipta.clone(),
            main_affair: self.main_affair.clone(),
            related_affairs: self.related_affairs.clone(),
            maturity: self.maturity,
            stage: self.stage.clone(),
            input_date: self.input_date.clone(),
            applied_date: self.applied_date.clone(),
            development_date: self.development_date.clone(),
            video: self.video.clone(),
            video_url: self.video_url.clone(),
            maturity_label: self.maturity_label.clone(),
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// A record to be inserted (no key yet).
///
/// After insertion the store returns a `Record` with the assigned key.
/// Fields missing from deserialized input take the add-form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewRecord {
    #[serde(rename = "judul_inovasi")]
    pub title: String,
    #[serde(rename = "pemda")]
    pub region: String,
    #[serde(rename = "admin_opd")]
    pub admin_unit: String,
    #[serde(rename = "inisiator")]
    pub initiator: String,
    #[serde(rename = "nama_inisiator")]
    pub initiator_name: String,
    #[serde(rename = "bentuk_inovasi")]
    pub form: String,
    #[serde(rename = "jenis")]
    pub kind: String,
    pub asta_cipta: String,
    #[serde(rename = "urusan_utama")]
    pub main_affair: String,
    #[serde(rename = "urusan_lain_yang_beririsan")]
    pub related_affairs: String,
    #[serde(rename = "kematangan")]
    pub maturity: f64,
    #[serde(rename = "tahapan_inovasi")]
    pub stage: String,
    #[serde(rename = "tanggal_input")]
    pub input_date: String,
    #[serde(rename = "tanggal_penerapan")]
    pub applied_date: String,
    #[serde(rename = "tanggal_pengembangan")]
    pub development_date: String,
    pub video: String,
    #[serde(rename = "link_video")]
    pub video_url: String,
    #[serde(rename = "label_kematangan")]
    pub maturity_label: String,
    pub lat: f64,
    pub lon: f64,
}

impl Default for NewRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            region: DEFAULT_REGION.to_string(),
            admin_unit: String::new(),
            initiator: String::new(),
            initiator_name: String::new(),
            form: String::new(),
            kind: String::new(),
            asta_cipta: String::new(),
            main_affair: String::new(),
            related_affairs: String::new(),
            maturity: DEFAULT_MATURITY,
            stage: String::new(),
            input_date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            applied_date: String::new(),
            development_date: String::new(),
            video: VIDEO_ABSENT.to_string(),
            video_url: String::new(),
            maturity_label: DEFAULT_MATURITY_LABEL.to_string(),
            lat: DEFAULT_COORDINATES.0,
            lon: DEFAULT_COORDINATES.1,
        }
    }
}

impl NewRecord {
    /// Create a new record with a title and editor defaults for the rest.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Attach the store-assigned key, producing a persisted `Record`.
    #[must_use]
    pub fn into_record(self, key: RecordKey) -> Record {
        Record {
            key,
            title: self.title,
            region: self.region,
            admin_unit: self.admin_unit,
            initiator: self.initiator,
            initiator_name: self.initiator_name,
            form: self.form,
            kind: self.kind,
            asta_cipta: self.asta_cipta,
            main_affair: self.main_affair,
            related_affairs: self.related_affairs,
            maturity: self.maturity,
            stage: self.stage,
            input_date: self.input_date,
            applied_date: self.applied_date,
            development_date: self.development_date,
            video: self.video,
            video_url: self.video_url,
            maturity_label: self.maturity_label,
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// Partial record update.
///
/// `None` means "leave this field unchanged"; only present fields are
/// serialized. The key is not part of a patch and can never be changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(rename = "judul_inovasi", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "pemda", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "admin_opd", skip_serializing_if = "Option::is_none")]
    pub admin_unit: Option<String>,
    #[serde(rename = "inisiator", skip_serializing_if = "Option::is_none")]
    pub initiator: Option<String>,
    #[serde(rename = "nama_inisiator", skip_serializing_if = "Option::is_none")]
    pub initiator_name: Option<String>,
    #[serde(rename = "bentuk_inovasi", skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(rename = "jenis", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asta_cipta: Option<String>,
    #[serde(rename = "urusan_utama", skip_serializing_if = "Option::is_none")]
    pub main_affair: Option<String>,
    #[serde(
        rename = "urusan_lain_yang_beririsan",
        skip_serializing_if = "Option::is_none"
    )]
    pub related_affairs: Option<String>,
    #[serde(rename = "kematangan", skip_serializing_if = "Option::is_none")]
    pub maturity: Option<f64>,
    #[serde(rename = "tahapan_inovasi", skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(rename = "tanggal_input", skip_serializing_if = "Option::is_none")]
    pub input_date: Option<String>,
    #[serde(rename = "tanggal_penerapan", skip_serializing_if = "Option::is_none")]
    pub applied_date: Option<String>,
    #[serde(rename = "tanggal_pengembangan", skip_serializing_if = "Option::is_none")]
    pub development_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(rename = "link_video", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(rename = "label_kematangan", skip_serializing_if = "Option::is_none")]
    pub maturity_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl RecordPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge the present fields into `record`. The key is left untouched.
    pub fn apply_to(&self, record: &mut Record) {
        fn set(target: &mut String, value: Option<&String>) {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }

        set(&mut record.title, self.title.as_ref());
        set(&mut record.region, self.region.as_ref());
        set(&mut record.admin_unit, self.admin_unit.as_ref());
        set(&mut record.initiator, self.initiator.as_ref());
        set(&mut record.initiator_name, self.initiator_name.as_ref());
        set(&mut record.form, self.form.as_ref());
        set(&mut record.kind, self.kind.as_ref());
        set(&mut record.asta_cipta, self.asta_cipta.as_ref());
        set(&mut record.main_affair, self.main_affair.as_ref());
        set(&mut record.related_affairs, self.related_affairs.as_ref());
        set(&mut record.stage, self.stage.as_ref());
        set(&mut record.input_date, self.input_date.as_ref());
        set(&mut record.applied_date, self.applied_date.as_ref());
        set(&mut record.development_date, self.development_date.as_ref());
        set(&mut record.video, self.video.as_ref());
        set(&mut record.video_url, self.video_url.as_ref());
        set(&mut record.maturity_label, self.maturity_label.as_ref());
        if let Some(maturity) = self.maturity {
            record.maturity = maturity;
        }
        if let Some(lat) = self.lat {
            record.lat = lat;
        }
        if let Some(lon) = self.lon {
            record.lon = lon;
        }
    }

    /// Build a patch that turns `current` into `target`, field by field.
    ///
    /// Keys are ignored; only differing fields are set.
    #[must_use]
    pub fn diff(current: &Record, target: &Record) -> Self {
        fn changed(a: &str, b: &str) -> Option<String> {
            (a != b).then(|| b.to_string())
        }
        #[allow(clippy::float_cmp)]
        fn changed_num(a: f64, b: f64) -> Option<f64> {
            (a != b).then_some(b)
        }

        Self {
            title: changed(&current.title, &target.title),
            region: changed(&current.region, &target.region),
            admin_unit: changed(&current.admin_unit, &target.admin_unit),
            initiator: changed(&current.initiator, &target.initiator),
            initiator_name: changed(&current.initiator_name, &target.initiator_name),
            form: changed(&current.form, &target.form),
            kind: changed(&current.kind, &target.kind),
            asta_cipta: changed(&current.asta_cipta, &target.asta_cipta),
            main_affair: changed(&current.main_affair, &target.main_affair),
            related_affairs: changed(&current.related_affairs, &target.related_affairs),
            maturity: changed_num(current.maturity, target.maturity),
            stage: changed(&current.stage, &target.stage),
            input_date: changed(&current.input_date, &target.input_date),
            applied_date: changed(&current.applied_date, &target.applied_date),
            development_date: changed(&current.development_date, &target.development_date),
            video: changed(&current.video, &target.video),
            video_url: changed(&current.video_url, &target.video_url),
            maturity_label: changed(&current.maturity_label, &target.maturity_label),
            lat: changed_num(current.lat, target.lat),
            lon: changed_num(current.lon, target.lon),
        }
    }
}

/// Split a joined related-affairs column into trimmed, non-empty tags.
pub fn split_related_affairs(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Join related-affair tags into the single-column representation.
pub fn join_related_affairs<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| tag.as_ref().trim())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(RELATED_AFFAIRS_SEPARATOR)
}

use crate::calendar::WeekdayFormat;
use thiserror::Error;
use time::{Month, Weekday};

/// Names used when formatting dates.  Weekday arrays begin on Sunday.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Locale {
    id: &'static str,
    months: [&'static str; 12],
    months_short: [&'static str; 12],
    weekdays: [&'static str; 7],
    weekdays_short: [&'static str; 7],
    weekdays_min: [&'static str; 7],
}

static EN: Locale = Locale {
    id: "en",
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekdays: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    weekdays_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    weekdays_min: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
};

static FR: Locale = Locale {
    id: "fr",
    months: [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
    months_short: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
        "déc.",
    ],
    weekdays: [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    weekdays_short: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
    weekdays_min: ["di", "lu", "ma", "me", "je", "ve", "sa"],
};

static DE: Locale = Locale {
    id: "de",
    months: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    months_short: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    weekdays: [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    weekdays_short: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
    weekdays_min: ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
};

static ES: Locale = Locale {
    id: "es",
    months: [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ],
    months_short: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
    ],
    weekdays: [
        "domingo",
        "lunes",
        "martes",
        "miércoles",
        "jueves",
        "viernes",
        "sábado",
    ],
    weekdays_short: ["dom.", "lun.", "mar.", "mié.", "jue.", "vie.", "sáb."],
    weekdays_min: ["do", "lu", "ma", "mi", "ju", "vi", "sá"],
};

static NL: Locale = Locale {
    id: "nl",
    months: [
        "januari",
        "februari",
        "maart",
        "april",
        "mei",
        "juni",
        "juli",
        "augustus",
        "september",
        "oktober",
        "november",
        "december",
    ],
    months_short: [
        "jan.", "feb.", "mrt.", "apr.", "mei", "jun.", "jul.", "aug.", "sep.", "okt.", "nov.",
        "dec.",
    ],
    weekdays: [
        "zondag",
        "maandag",
        "dinsdag",
        "woensdag",
        "donderdag",
        "vrijdag",
        "zaterdag",
    ],
    weekdays_short: ["zo.", "ma.", "di.", "wo.", "do.", "vr.", "za."],
    weekdays_min: ["zo", "ma", "di", "wo", "do", "vr", "za"],
};

static VI: Locale = Locale {
    id: "vi",
    months: [
        "tháng 1",
        "tháng 2",
        "tháng 3",
        "tháng 4",
        "tháng 5",
        "tháng 6",
        "tháng 7",
        "tháng 8",
        "tháng 9",
        "tháng 10",
        "tháng 11",
        "tháng 12",
    ],
    months_short: [
        "Thg 01", "Thg 02", "Thg 03", "Thg 04", "Thg 05", "Thg 06", "Thg 07", "Thg 08", "Thg 09",
        "Thg 10", "Thg 11", "Thg 12",
    ],
    weekdays: [
        "chủ nhật",
        "thứ hai",
        "thứ ba",
        "thứ tư",
        "thứ năm",
        "thứ sáu",
        "thứ bảy",
    ],
    weekdays_short: ["CN", "T2", "T3", "T4", "T5", "T6", "T7"],
    weekdays_min: ["CN", "T2", "T3", "T4", "T5", "T6", "T7"],
};

static LOCALES: &[&Locale] = &[&EN, &FR, &DE, &ES, &NL, &VI];

impl Locale {
    pub fn english() -> &'static Locale {
        &EN
    }

    /// Looks up a locale by identifier.  Matching is case-insensitive, and a
    /// region suffix (`fr-CA`, `de_AT`) falls back to the base language.
    pub fn load(id: &str) -> Result<&'static Locale, LocaleError> {
        let lang = id
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        LOCALES
            .iter()
            .copied()
            .find(|loc| loc.id == lang)
            .ok_or_else(|| LocaleError::Unknown(id.to_owned()))
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn month_name(&self, month: Month) -> &'static str {
        self.months[usize::from(u8::from(month) - 1)]
    }

    pub fn month_short_name(&self, month: Month) -> &'static str {
        self.months_short[usize::from(u8::from(month) - 1)]
    }

    pub fn weekday_name(&self, wd: Weekday, format: WeekdayFormat) -> &'static str {
        let i = usize::from(wd.number_days_from_sunday());
        match format {
            WeekdayFormat::Narrow => self.weekdays_min[i],
            WeekdayFormat::Short => self.weekdays_short[i],
            WeekdayFormat::Long => self.weekdays[i],
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LocaleError {
    #[error("unknown locale {0:?}")]
    Unknown(String),
}

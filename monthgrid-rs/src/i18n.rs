//! Interface strings and language selection.

use crate::error::StoreError;
use crate::settings::{NumberPosition, TitlePosition};
use crate::store::{KeyValueStore, LANGUAGE_KEY};
use std::sync::{Arc, RwLock};

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug)]
pub struct Instructions {
    pub colors: &'static str,
    pub font: &'static str,
    pub grid: &'static str,
    pub title_position: &'static str,
    pub number_position: &'static str,
}

#[derive(Debug)]
pub struct Controls {
    pub colors: &'static str,
    pub main: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub hint: &'static str,
    pub font: &'static str,
    pub title_font_size: &'static str,
    pub number_font_size: &'static str,
    pub grid: &'static str,
    pub show: &'static str,
    pub hide: &'static str,
    pub title_position: &'static str,
    pub number_position: &'static str,
    pub dimensions: &'static str,
    pub width: &'static str,
    pub height: &'static str,
    pub border_radius: &'static str,
    pub settings: &'static str,
    pub export: &'static str,
    pub import: &'static str,
    pub export_images: &'static str,
    pub export_width: &'static str,
    pub export_height: &'static str,
    pub language: &'static str,
    pub day_name_format: &'static str,
    pub short_day_names: &'static str,
    pub long_day_names: &'static str,
}

#[derive(Debug)]
pub struct Positions {
    pub left: &'static str,
    pub center: &'static str,
    pub right: &'static str,
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
}

#[derive(Debug)]
pub struct Messages {
    pub settings_copied: &'static str,
    pub settings_downloaded: &'static str,
    pub settings_imported: &'static str,
    pub invalid_settings: &'static str,
    pub generating_images: &'static str,
    pub export_complete: &'static str,
    pub valid_dimensions: &'static str,
    pub generating: &'static str,
    pub of: &'static str,
}

/// Every display string for one language.
#[derive(Debug)]
pub struct Translation {
    pub code: &'static str,
    pub title: &'static str,
    pub select_month: &'static str,
    pub month_input_helper: &'static str,
    pub usage_instructions: &'static str,
    pub year_overview: &'static str,
    pub instructions: Instructions,
    pub controls: Controls,
    pub positions: Positions,
    pub messages: Messages,
    /// January first.
    pub months: [&'static str; 12],
    /// Monday first.
    pub days_short: [&'static str; 7],
    /// Monday first.
    pub days_long: [&'static str; 7],
}

impl Translation {
    /// Name of the month at `month_index` (0 = January).
    ///
    /// Panics if `month_index` is 12 or more; validate through `MonthView`.
    pub fn month_name(&self, month_index: u32) -> &'static str {
        self.months[month_index as usize]
    }

    pub fn day_names(&self, long: bool) -> &[&'static str; 7] {
        if long {
            &self.days_long
        } else {
            &self.days_short
        }
    }

    pub fn title_position_label(&self, position: TitlePosition) -> &'static str {
        match position {
            TitlePosition::Left => self.positions.left,
            TitlePosition::Center => self.positions.center,
            TitlePosition::Right => self.positions.right,
        }
    }

    pub fn number_position_label(&self, position: NumberPosition) -> &'static str {
        match position {
            NumberPosition::TopLeft => self.positions.top_left,
            NumberPosition::TopRight => self.positions.top_right,
            NumberPosition::BottomLeft => self.positions.bottom_left,
            NumberPosition::BottomRight => self.positions.bottom_right,
            NumberPosition::Center => self.positions.center,
        }
    }

    /// "Generating 3 of 12"
    pub fn progress(&self, done: usize, total: usize) -> String {
        format!(
            "{} {} {} {}",
            self.messages.generating, done, self.messages.of, total
        )
    }
}

pub static EN: Translation = Translation {
    code: "en",
    title: "Calendar Generator",
    select_month: "Select Month:",
    month_input_helper: "Enter numbers only (e.g., 202409)",
    usage_instructions: "Usage Instructions:",
    year_overview: "Year Overview",
    instructions: Instructions {
        colors: "Click the color boxes to change main text, accent (weekends), background, and grid line colors",
        font: "Select from popular Google Fonts for a different typography style",
        grid: "Toggle grid lines on/off for a cleaner or more structured look",
        title_position: "Place the month name on the left, center, or right",
        number_position: "Position day numbers in different corners of each cell or center them",
    },
    controls: Controls {
        colors: "Colors",
        main: "Main:",
        accent: "Accent:",
        background: "Background:",
        hint: "Grid:",
        font: "Font Family",
        title_font_size: "Title Font Size",
        number_font_size: "Number Font Size",
        grid: "Grid Lines",
        show: "Show",
        hide: "Hide",
        title_position: "Title Position",
        number_position: "Number Position",
        dimensions: "Dimensions",
        width: "Width",
        height: "Height",
        border_radius: "Border Radius",
        settings: "Settings",
        export: "Export Settings",
        import: "Import Settings",
        export_images: "Export Calendar Images",
        export_width: "Export Width (px)",
        export_height: "Export Height (px)",
        language: "Language",
        day_name_format: "Day Name Format",
        short_day_names: "Short (Mon, Tue, Wed)",
        long_day_names: "Long (Monday, Tuesday, Wednesday)",
    },
    positions: Positions {
        left: "Left",
        center: "Center",
        right: "Right",
        top_left: "Top Left",
        top_right: "Top Right",
        bottom_left: "Bottom Left",
        bottom_right: "Bottom Right",
    },
    messages: Messages {
        settings_copied: "Settings copied to clipboard!",
        settings_downloaded: "Settings downloaded as JSON file!",
        settings_imported: "Settings imported successfully!",
        invalid_settings: "Invalid settings format. Please check your JSON.",
        generating_images: "Generating calendar images...",
        export_complete: "ZIP file downloaded successfully!",
        valid_dimensions: "Please enter valid width and height values",
        generating: "Generating",
        of: "of",
    },
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ],
    days_short: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    days_long: [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ],
};

pub static RU: Translation = Translation {
    code: "ru",
    title: "Генератор календаря",
    select_month: "Выберите месяц:",
    month_input_helper: "Введите только цифры (например, 202409)",
    usage_instructions: "Инструкции по использованию:",
    year_overview: "Обзор года",
    instructions: Instructions {
        colors: "Нажмите на цветные квадраты, чтобы изменить цвет основного текста, акцента (выходные), фона и линий сетки",
        font: "Выберите из популярных Google Fonts для другого стиля типографики",
        grid: "Включите/отключите линии сетки для более чистого или структурированного вида",
        title_position: "Разместите название месяца слева, по центру или справа",
        number_position: "Расположите номера дней в разных углах каждой ячейки или по центру",
    },
    controls: Controls {
        colors: "Цвета",
        main: "Основной:",
        accent: "Акцент:",
        background: "Фон:",
        hint: "Сетка:",
        font: "Шрифт",
        title_font_size: "Размер шрифта заголовка",
        number_font_size: "Размер шрифта чисел",
        grid: "Линии сетки",
        show: "Показать",
        hide: "Скрыть",
        title_position: "Позиция заголовка",
        number_position: "Позиция чисел",
        dimensions: "Размеры",
        width: "Ширина",
        height: "Высота",
        border_radius: "Радиус границы",
        settings: "Настройки",
        export: "Экспорт настроек",
        import: "Импорт настроек",
        export_images: "Экспорт изображений календаря",
        export_width: "Ширина экспорта (px)",
        export_height: "Высота экспорта (px)",
        language: "Язык",
        day_name_format: "Формат дней недели",
        short_day_names: "Краткий (Пн, Вт, Ср)",
        long_day_names: "Полный (Понедельник, Вторник, Среда)",
    },
    positions: Positions {
        left: "Слева",
        center: "По центру",
        right: "Справа",
        top_left: "Вверху слева",
        top_right: "Вверху справа",
        bottom_left: "Внизу слева",
        bottom_right: "Внизу справа",
    },
    messages: Messages {
        settings_copied: "Настройки скопированы в буфер обмена!",
        settings_downloaded: "Настройки загружены как JSON файл!",
        settings_imported: "Настройки успешно импортированы!",
        invalid_settings: "Неверный формат настроек. Проверьте ваш JSON.",
        generating_images: "Генерация изображений календаря...",
        export_complete: "ZIP файл успешно загружен!",
        valid_dimensions: "Пожалуйста, введите корректные значения ширины и высоты",
        generating: "Генерация",
        of: "из",
    },
    months: [
        "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август",
        "Сентябрь", "Октябрь", "Ноябрь", "Декабрь",
    ],
    days_short: ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"],
    days_long: [
        "Понедельник", "Вторник", "Среда", "Четверг", "Пятница", "Суббота", "Воскресенье",
    ],
};

/// A selectable interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

pub const LANGUAGES: [Language; 2] = [
    Language {
        code: "en",
        name: "English",
        native_name: "English",
    },
    Language {
        code: "ru",
        name: "Russian",
        native_name: "Русский",
    },
];

pub fn available_languages() -> &'static [Language] {
    &LANGUAGES
}

fn lookup(code: &str) -> Option<&'static Translation> {
    match code {
        "en" => Some(&EN),
        "ru" => Some(&RU),
        _ => None,
    }
}

/// Translation for a two-letter code, English for anything unknown.
pub fn translation_for(code: &str) -> &'static Translation {
    lookup(code).unwrap_or(&EN)
}

/// Reduce a locale such as `ru_RU.UTF-8` or `en-US` to its language code.
pub fn language_code_of(locale: &str) -> String {
    locale
        .split(['-', '_', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Locale from `LC_ALL`, `LC_MESSAGES` or `LANG`, in that order.
pub fn env_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.is_empty() && v != "C" && v != "POSIX")
}

/// Owns the active language and persists explicit changes.
pub struct LanguageContext {
    current: RwLock<&'static Translation>,
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for LanguageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageContext")
            .field("language", &self.language())
            .finish()
    }
}

impl LanguageContext {
    /// Pick the language once: saved preference, then the given locale, then
    /// English. Only known codes are accepted at each step.
    pub fn detect(store: Arc<dyn KeyValueStore>, locale: Option<&str>) -> Self {
        let saved = match store.get(LANGUAGE_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("Ignoring saved language preference: {e}");
                None
            }
        };
        let translation = saved
            .as_deref()
            .and_then(lookup)
            .or_else(|| locale.map(language_code_of).as_deref().and_then(lookup))
            .unwrap_or(&EN);
        log::debug!("Interface language: {}", translation.code);

        Self {
            current: RwLock::new(translation),
            store,
        }
    }

    pub fn translation(&self) -> &'static Translation {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn language(&self) -> &'static str {
        self.translation().code
    }

    /// Switch language and persist the choice.
    ///
    /// Unknown codes are ignored and return `Ok(false)`.
    pub fn set_language(&self, code: &str) -> Result<bool, StoreError> {
        let Some(translation) = lookup(code) else {
            log::warn!("Ignoring unknown language code {code:?}");
            return Ok(false);
        };
        self.store.set(LANGUAGE_KEY, code)?;
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = translation;
        Ok(true)
    }
}

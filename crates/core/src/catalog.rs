//! Field validation and slug generation for catalog records (projects,
//! photos, categories, tags).

use validator::ValidateUrl;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of a project title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a category or tag name, in characters.
pub const MAX_NAME_LEN: usize = 80;

/// Maximum length of a photo caption, in characters.
pub const MAX_CAPTION_LEN: usize = 500;

/// Earliest accepted completion year.
pub const MIN_YEAR: i32 = 1900;

/// Latest accepted completion year.
pub const MAX_YEAR: i32 = 2100;

/// Image MIME types accepted for photo uploads.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

/// Build a URL slug: lowercase ASCII, Cyrillic transliterated, runs of other
/// characters collapsed to a single `-`, no leading or trailing dash.
///
/// ```
/// use folio_core::catalog::slugify;
///
/// assert_eq!(slugify("Office Fit-Out  2024"), "office-fit-out-2024");
/// assert_eq!(slugify("Кухня на заказ"), "kukhnya-na-zakaz");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        let piece = if ch.is_ascii_alphanumeric() {
            Some(ch.to_string())
        } else {
            transliterate(ch).map(str::to_string)
        };

        match piece {
            Some(p) if !p.is_empty() => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push_str(&p);
            }
            // Soft and hard signs vanish without splitting the word.
            Some(_) => {}
            None => pending_dash = true,
        }
    }

    slug
}

fn transliterate(ch: char) -> Option<&'static str> {
    let s = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'э' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        'ъ' | 'ь' => "",
        _ => return None,
    };
    Some(s)
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate a project title: non-blank and at most [`MAX_TITLE_LEN`] chars.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_text("title", title, MAX_TITLE_LEN)
}

/// Validate a category or tag name: non-blank and at most [`MAX_NAME_LEN`]
/// chars. The name must also produce a non-empty slug.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    validate_text("name", name, MAX_NAME_LEN)?;
    if slugify(name).is_empty() {
        return Err(CoreError::Validation(format!(
            "name '{name}' must contain at least one letter or digit"
        )));
    }
    Ok(())
}

/// Validate an optional photo caption length.
pub fn validate_caption(caption: Option<&str>) -> Result<(), CoreError> {
    match caption {
        Some(c) if c.chars().count() > MAX_CAPTION_LEN => Err(CoreError::Validation(format!(
            "caption must be at most {MAX_CAPTION_LEN} characters"
        ))),
        _ => Ok(()),
    }
}

/// Validate a completion year within [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn validate_year(year: i32) -> Result<(), CoreError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
        )))
    }
}

/// Validate an absolute image URL (e.g. a cover image hosted elsewhere).
pub fn validate_image_url(url: &str) -> Result<(), CoreError> {
    if url.trim().is_empty() || !url.validate_url() {
        return Err(CoreError::Validation(format!("'{url}' is not a valid URL")));
    }
    Ok(())
}

/// Validate an upload's declared content type.
pub fn validate_content_type(content_type: &str) -> Result<(), CoreError> {
    if ALLOWED_IMAGE_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image type '{content_type}'. Must be one of: {}",
            ALLOWED_IMAGE_TYPES.join(", ")
        )))
    }
}

/// File extension stored objects get for an accepted content type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

fn validate_text(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

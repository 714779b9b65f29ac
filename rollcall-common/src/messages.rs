//! Localized messages for scan devices and their companion UIs
//!
//! The reader hardware shows the short `flag` string on its display while
//! the companion app renders the full `message`, so both exist per language.
//! The language comes from the device's `Accept-Language` header; anything
//! unrecognized falls back to English.

/// Supported response languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Fr,
}

impl Lang {
    /// Pick a language from an `Accept-Language` header value.
    ///
    /// Only the primary subtag of the first listed language is considered
    /// (`fr-CA,fr;q=0.9` selects French).
    pub fn from_accept_language(header: Option<&str>) -> Self {
        let Some(raw) = header else { return Lang::En };
        let first = raw.split(',').next().unwrap_or("").trim();
        let tag = first
            .split(['-', ';'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match tag.as_str() {
            "fr" => Lang::Fr,
            _ => Lang::En,
        }
    }
}

pub fn missing_fields(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "uid and device_uid are required.",
        Lang::Fr => "uid et device_uid sont requis.",
    }
}

pub fn uid_not_registered(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "New UID - Registration required",
        Lang::Fr => "Nouvel UID - Enregistrement requis",
    }
}

pub fn register_now(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Register now",
        Lang::Fr => "Enregistrez maintenant",
    }
}

pub fn outside_time(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Outside allowed sign-in/sign-out time",
        Lang::Fr => "En dehors des heures autorisées de pointage",
    }
}

pub fn outside_flag(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Outside Time",
        Lang::Fr => "Hors temps",
    }
}

pub fn sign_in_first(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Sign-in required before sign-out",
        Lang::Fr => "Connexion requise avant déconnexion",
    }
}

pub fn sign_in_flag(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "SignIn 1st",
        Lang::Fr => "Connectez-vous d'abord",
    }
}

pub fn signed_in(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Signed in",
        Lang::Fr => "Connecté",
    }
}

pub fn late_sign_in(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "You signed in late",
        Lang::Fr => "Vous vous êtes connecté en retard",
    }
}

pub fn signed_out(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Signed out",
        Lang::Fr => "Déconnecté",
    }
}

pub fn early_leave(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "You signed out early",
        Lang::Fr => "Vous êtes parti en avance",
    }
}

pub fn scan_failed(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Scan failed",
        Lang::Fr => "Échec du scan",
    }
}

pub fn device_required(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "device_uid is required",
        Lang::Fr => "device_uid est requis",
    }
}

pub fn time_settings_not_found(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Time settings not found",
        Lang::Fr => "Paramètres horaires introuvables",
    }
}

/// A tag owned by `school` was scanned by another tenant's device
pub fn mismatch(lang: Lang, school: &str) -> String {
    match lang {
        Lang::En => format!("\"{school}\" student here"),
        Lang::Fr => format!("\"{school}\" élève ici"),
    }
}

/// Fallback tenant display name when the owning tenant row is missing
pub fn another_school(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "another school",
        Lang::Fr => "une autre école",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_accept_language_header() {
        assert_eq!(Lang::from_accept_language(None), Lang::En);
        assert_eq!(Lang::from_accept_language(Some("en-US,en;q=0.9")), Lang::En);
        assert_eq!(Lang::from_accept_language(Some("fr")), Lang::Fr);
        assert_eq!(Lang::from_accept_language(Some("fr-CA,fr;q=0.9")), Lang::Fr);
        assert_eq!(Lang::from_accept_language(Some("FR;q=1.0")), Lang::Fr);
        assert_eq!(Lang::from_accept_language(Some("de-DE,de;q=0.8")), Lang::En);
        assert_eq!(Lang::from_accept_language(Some("")), Lang::En);
    }

    #[test]
    fn test_mismatch_names_the_owning_school() {
        let msg = mismatch(Lang::En, "Northside Academy");
        assert!(msg.contains("Northside Academy"));
        let msg = mismatch(Lang::Fr, "Northside Academy");
        assert!(msg.contains("Northside Academy"));
    }

    #[test]
    fn test_french_catalog_differs_from_english() {
        assert_ne!(signed_in(Lang::En), signed_in(Lang::Fr));
        assert_ne!(outside_time(Lang::En), outside_time(Lang::Fr));
    }
}

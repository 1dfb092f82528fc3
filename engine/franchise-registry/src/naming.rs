/// Normalized comparison key for a player name
///
/// Case, diacritics, apostrophes, periods and hyphens are ignored and runs of
/// whitespace collapse to a single space, so "Nikola Jokić", "nikola jokic"
/// and "Shaquille O'Neal" / "Shaquille ONeal" compare equal.
pub fn name_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_space = false;

    for ch in name.chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_space = !key.is_empty();
            continue;
        }
        if matches!(ch, '\'' | '\u{2019}' | '\u{2018}' | '`' | '.') {
            continue;
        }

        if pending_space {
            key.push(' ');
            pending_space = false;
        }

        match fold_diacritic(ch) {
            Some(folded) => key.push_str(folded),
            None => key.extend(ch.to_lowercase()),
        }
    }

    key
}

/// True when two names refer to the same player under `name_key` rules
pub fn same_player(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}

/// Latin-1 and Latin Extended-A letters folded to lowercase ASCII
fn fold_diacritic(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'Ā' | 'ā' | 'Ă'
        | 'ă' | 'Ą' | 'ą' => "a",
        'Æ' | 'æ' => "ae",
        'Ç' | 'ç' | 'Ć' | 'ć' | 'Ĉ' | 'ĉ' | 'Ċ' | 'ċ' | 'Č' | 'č' => "c",
        'Ď' | 'ď' | 'Đ' | 'đ' | 'Ð' | 'ð' => "d",
        'È' | 'É' | 'Ê' | 'Ë' | 'è' | 'é' | 'ê' | 'ë' | 'Ē' | 'ē' | 'Ė' | 'ė' | 'Ę' | 'ę' | 'Ě'
        | 'ě' => "e",
        'Ğ' | 'ğ' | 'Ģ' | 'ģ' => "g",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'ì' | 'í' | 'î' | 'ï' | 'Ī' | 'ī' | 'Į' | 'į' | 'İ' | 'ı' => "i",
        'Ķ' | 'ķ' => "k",
        'Ĺ' | 'ĺ' | 'Ļ' | 'ļ' | 'Ľ' | 'ľ' | 'Ł' | 'ł' => "l",
        'Ñ' | 'ñ' | 'Ń' | 'ń' | 'Ņ' | 'ņ' | 'Ň' | 'ň' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'Ō' | 'ō' | 'Ő'
        | 'ő' => "o",
        'Œ' | 'œ' => "oe",
        'Ŕ' | 'ŕ' | 'Ř' | 'ř' => "r",
        'Ś' | 'ś' | 'Ş' | 'ş' | 'Š' | 'š' => "s",
        'ß' => "ss",
        'Ţ' | 'ţ' | 'Ť' | 'ť' => "t",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'ù' | 'ú' | 'û' | 'ü' | 'Ū' | 'ū' | 'Ů' | 'ů' | 'Ű' | 'ű' => "u",
        'Ý' | 'ý' | 'ÿ' | 'Ÿ' => "y",
        'Ź' | 'ź' | 'Ż' | 'ż' | 'Ž' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diacritics_fold() {
        assert_eq!(name_key("Nikola Jokić"), "nikola jokic");
        assert_eq!(name_key("Dražen Petrović"), "drazen petrovic");
        assert_eq!(name_key("Manu Ginóbili"), "manu ginobili");
    }

    #[test]
    fn test_apostrophes_and_case() {
        assert!(same_player("Shaquille O'Neal", "SHAQUILLE ONEAL"));
        assert!(same_player("D'Angelo Russell", "D\u{2019}Angelo Russell"));
        assert!(same_player("Karl-Anthony Towns", "karl anthony towns"));
        assert!(same_player("J.J. Redick", "JJ Redick"));
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(name_key("  Tim   Duncan "), "tim duncan");
        assert!(!same_player("Tim Duncan", "Tim Hardaway"));
    }

    proptest::proptest! {
        #[test]
        fn prop_name_key_idempotent(name in "[A-Za-z\u{C0}-\u{FF}' .-]{0,24}") {
            let key = name_key(&name);
            proptest::prop_assert_eq!(name_key(&key), key.clone());
            proptest::prop_assert!(!key.starts_with(' ') && !key.ends_with(' '));
        }
    }
}

use crate::City;

/// Display form of a stored URL: scheme and leading slashes removed.
pub(crate) fn strip_protocol(url: &str) -> String {
    let trimmed = url.trim();
    if let Some(idx) = trimmed.find("://") {
        return trimmed[idx + 3..].to_string();
    }
    trimmed.trim_start_matches("//").to_string()
}

/// Uppercases the first letter of every whitespace-separated word, leaving
/// the rest of each word untouched. City names arrive lowercased from the
/// service.
pub(crate) fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// ISO alpha-2 code to display name. Unknown codes pass through uppercased
/// so the table still shows something useful.
pub(crate) fn country_name(code: &str) -> String {
    let code = code.trim().to_ascii_uppercase();
    let name = match code.as_str() {
        "AR" => "Argentina",
        "AT" => "Austria",
        "AU" => "Australia",
        "BE" => "Belgium",
        "BG" => "Bulgaria",
        "BO" => "Bolivia",
        "BR" => "Brazil",
        "CA" => "Canada",
        "CH" => "Switzerland",
        "CL" => "Chile",
        "CN" => "China",
        "CO" => "Colombia",
        "CR" => "Costa Rica",
        "CU" => "Cuba",
        "CZ" => "Czechia",
        "DE" => "Germany",
        "DK" => "Denmark",
        "DO" => "Dominican Republic",
        "EC" => "Ecuador",
        "EE" => "Estonia",
        "EG" => "Egypt",
        "ES" => "Spain",
        "FI" => "Finland",
        "FR" => "France",
        "GB" => "United Kingdom",
        "GH" => "Ghana",
        "GR" => "Greece",
        "GT" => "Guatemala",
        "HK" => "Hong Kong",
        "HR" => "Croatia",
        "HU" => "Hungary",
        "ID" => "Indonesia",
        "IE" => "Ireland",
        "IL" => "Israel",
        "IN" => "India",
        "IT" => "Italy",
        "JP" => "Japan",
        "KE" => "Kenya",
        "KR" => "South Korea",
        "LT" => "Lithuania",
        "LV" => "Latvia",
        "MA" => "Morocco",
        "MX" => "Mexico",
        "MY" => "Malaysia",
        "NG" => "Nigeria",
        "NL" => "Netherlands",
        "NO" => "Norway",
        "NZ" => "New Zealand",
        "PA" => "Panama",
        "PE" => "Peru",
        "PH" => "Philippines",
        "PK" => "Pakistan",
        "PL" => "Poland",
        "PT" => "Portugal",
        "PY" => "Paraguay",
        "RO" => "Romania",
        "RS" => "Serbia",
        "RU" => "Russia",
        "SE" => "Sweden",
        "SG" => "Singapore",
        "SI" => "Slovenia",
        "SK" => "Slovakia",
        "TH" => "Thailand",
        "TR" => "Turkey",
        "TW" => "Taiwan",
        "UA" => "Ukraine",
        "US" => "United States",
        "UY" => "Uruguay",
        "VE" => "Venezuela",
        "VN" => "Vietnam",
        "ZA" => "South Africa",
        _ => return code,
    };
    name.to_string()
}

/// "City - Country" label shown in tables and marker popups.
pub(crate) fn location_label(city: &City) -> String {
    format!("{} - {}", title_case(&city.name), country_name(&city.country))
}

/// Concatenated labels the table search matches against for a row with
/// multiple cities.
pub(crate) fn location_search_text(cities: &[City]) -> String {
    cities
        .iter()
        .map(location_label)
        .collect::<Vec<_>>()
        .join(" ")
}

//! Context-aware string synthesis from field names.
//!
//! A string field named `email_address` should look like an email address,
//! `city` like a city, `company_name` like a company. The field's declared
//! name is the only signal: it is lower-cased and run through substring
//! tests in a fixed priority order, first match wins. Order matters —
//! `email_id` must match the email category before the id category.
//!
//! This is a total function: every name lands in exactly one category, and
//! unmatched names fall through to a whimsical display name rather than
//! erroring.

use fake::Fake;
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, StateName, StreetName, ZipCode,
};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{DomainSuffix, SafeEmail};
use fake::faker::job::en::Title as JobTitle;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;

/// Color names for `color`/`colour` fields. The `fake` crate has no color
/// faker, so the corpus is embedded.
const COLOR_NAMES: &[&str] = &[
    "red", "orange", "yellow", "green", "blue", "indigo", "violet", "teal", "maroon", "olive",
    "navy", "coral", "crimson", "turquoise", "lavender", "ochre",
];

/// Leading epithets for the fallback display-name category.
const EPITHETS: &[&str] = &[
    "Captain", "Doctor", "Professor", "Madame", "Colonel", "Baron", "Duchess", "Sergeant",
    "Reverend", "Admiral", "Countess", "Maestro",
];

/// Synthesize a string for a field based on its declared name.
///
/// The name may be snake_case or camelCase in any letter case; matching is
/// on the lower-cased form.
pub fn string_for_field<R: Rng + ?Sized>(field_name: &str, rng: &mut R) -> String {
    let name = field_name.to_lowercase();

    // Email.
    if name.contains("email") || name.contains("mail") {
        return SafeEmail().fake_with_rng(&mut *rng);
    }

    // Person names.
    if name.contains("firstname") || name.contains("first_name") {
        return FirstName().fake_with_rng(&mut *rng);
    }
    if name.contains("lastname") || name.contains("last_name") {
        return LastName().fake_with_rng(&mut *rng);
    }
    if name.contains("fullname")
        || name.contains("full_name")
        || name == "name"
        || name.contains("username")
        || name.contains("displayname")
        || name.contains("display_name")
    {
        return Name().fake_with_rng(&mut *rng);
    }

    // Phone.
    if name.contains("phone") || name.contains("mobile") || name.contains("tel") || name.contains("number")
    {
        return PhoneNumber().fake_with_rng(&mut *rng);
    }

    // Address components.
    if name.contains("address") || name.contains("street") {
        let number: String = BuildingNumber().fake_with_rng(&mut *rng);
        let street: String = StreetName().fake_with_rng(&mut *rng);
        return format!("{number} {street}");
    }
    if name.contains("city") {
        return CityName().fake_with_rng(&mut *rng);
    }
    if name.contains("state") || name.contains("province") {
        return StateName().fake_with_rng(&mut *rng);
    }
    if name.contains("country") {
        return CountryName().fake_with_rng(&mut *rng);
    }
    if name.contains("zip") || name.contains("postal") {
        return ZipCode().fake_with_rng(&mut *rng);
    }

    // Internet.
    if name.contains("url") || name.contains("website") {
        let word: String = Word().fake_with_rng(&mut *rng);
        let suffix: String = DomainSuffix().fake_with_rng(&mut *rng);
        return format!("https://{word}.{suffix}");
    }
    if name.contains("domain") {
        let word: String = Word().fake_with_rng(&mut *rng);
        let suffix: String = DomainSuffix().fake_with_rng(&mut *rng);
        return format!("{word}.{suffix}");
    }

    // Company and occupation.
    if name.contains("company") || name.contains("organization") {
        return CompanyName().fake_with_rng(&mut *rng);
    }
    if name.contains("job") || name.contains("position") || name.contains("title") || name.contains("role")
    {
        return JobTitle().fake_with_rng(&mut *rng);
    }

    // Identifiers.
    if name.contains("id") || name.contains("uuid") {
        let bytes: [u8; 16] = rng.r#gen();
        return uuid::Builder::from_random_bytes(bytes).into_uuid().to_string();
    }

    // Prose.
    if name.contains("description")
        || name.contains("comment")
        || name.contains("note")
        || name.contains("message")
    {
        return Sentence(4..10).fake_with_rng(&mut *rng);
    }

    // Colors.
    if name.contains("color") || name.contains("colour") {
        return COLOR_NAMES[rng.gen_range(0..COLOR_NAMES.len())].to_string();
    }

    // Fallback: a whimsical display name.
    let epithet = EPITHETS[rng.gen_range(0..EPITHETS.len())];
    let surname: String = LastName().fake_with_rng(&mut *rng);
    format!("{epithet} {surname}")
}

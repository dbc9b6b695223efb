//! Address-book records projected from Mork rows.

use serde::Serialize;
use std::fmt;

/// Kind of a phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneType {
    /// Private number.
    Home,
    /// Business number.
    Work,
    /// Mobile number.
    Mobile,
    /// Private fax.
    FaxHome,
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Home => "home",
            Self::Work => "work",
            Self::Mobile => "mobile",
            Self::FaxHome => "fax (home)",
        };
        f.write_str(text)
    }
}

/// A phone number as written in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneNumber {
    /// Number text, unnormalized.
    pub number: String,
    /// Kind of number.
    #[serde(rename = "type")]
    pub kind: PhoneType,
}

/// Whether an address is private or business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    /// Private address.
    Home,
    /// Business address.
    Work,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("home"),
            Self::Work => f.write_str("work"),
        }
    }
}

/// A postal address. Missing parts are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    /// Private or business.
    #[serde(rename = "type")]
    pub kind: AddressKind,
    /// Street line.
    pub street: String,
    /// Postal code.
    pub zip: String,
    /// City.
    pub city: String,
}

/// One address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Display name, never empty.
    pub name: String,
    /// Phone numbers in column order.
    pub numbers: Vec<PhoneNumber>,
    /// Company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Home address first, then work address, each only when present.
    pub addresses: Vec<Address>,
    /// Path of the contact photo. The image itself is not loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Contact {
    /// Address of the given kind, if the contact has one.
    #[must_use]
    pub fn address(&self, kind: AddressKind) -> Option<&Address> {
        self.addresses.iter().find(|address| address.kind == kind)
    }
}

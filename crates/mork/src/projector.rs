//! Projection of decoded rows into [`Contact`]s.
//!
//! Every row is a candidate. Cells are resolved through the column and value
//! dictionaries and matched on the Thunderbird column names below; other
//! columns are ignored.
//!
//! | Column | Target |
//! |--------|--------|
//! | `DisplayName` | name |
//! | `HomePhone`, `WorkPhone`, `CellularNumber`, `FaxNumber` | numbers |
//! | `Company` | company |
//! | `HomeAddress`, `HomeZipCode`, `HomeCity` | home address |
//! | `WorkAddress`, `WorkZipCode`, `WorkCity` | work address |
//! | `PhotoName` | photo path below `<profile>/Photos` |
//!
//! Rows without a non-empty name are dropped.

use std::path::{Path, PathBuf};

use crate::contact::{Address, AddressKind, Contact, PhoneNumber, PhoneType};
use crate::parser::MorkDocument;
use crate::store::{CellMap, RowKey};
use crate::warning::Warning;

/// Directory below the profile that holds contact photos.
pub const PHOTO_DIR: &str = "Photos";

/// Settings for [`project`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectOptions {
    /// Profile directory the address book was read from. Photo paths are
    /// built relative to it; without it they stay relative.
    pub profile_dir: Option<PathBuf>,
}

impl ProjectOptions {
    /// Options resolving photos below `profile_dir`.
    #[must_use]
    pub fn with_profile_dir(profile_dir: impl Into<PathBuf>) -> Self {
        Self {
            profile_dir: Some(profile_dir.into()),
        }
    }

    fn photo_path(&self, name: &str) -> String {
        let base = self.profile_dir.as_deref().unwrap_or(Path::new(""));
        base.join(PHOTO_DIR).join(name).to_string_lossy().into_owned()
    }
}

/// Projects every named row of `document` into a contact, sorted by name.
///
/// Unresolvable cells are skipped silently; use [`project_collecting`] to
/// find out about them.
#[must_use]
pub fn project(document: &MorkDocument, options: &ProjectOptions) -> Vec<Contact> {
    project_collecting(document, options, &mut Vec::new())
}

/// Like [`project`], appending every skipped cell to `warnings`.
///
/// Contacts are ordered by byte-wise name comparison. Equal names keep the
/// order in which their rows were visited.
pub fn project_collecting(
    document: &MorkDocument,
    options: &ProjectOptions,
    warnings: &mut Vec<Warning>,
) -> Vec<Contact> {
    let mut contacts: Vec<Contact> = Vec::new();
    let already_skipped = warnings.len();

    for (key, cells) in &document.store {
        if let Some(contact) = project_row(*key, cells, document, options, warnings) {
            let index = contacts.partition_point(|existing| existing.name <= contact.name);
            contacts.insert(index, contact);
        }
    }

    tracing::debug!(
        possible = document.store.len(),
        imported = contacts.len(),
        skipped_cells = warnings.len() - already_skipped,
        "Projected contacts"
    );
    contacts
}

#[derive(Default)]
struct PendingAddress<'a> {
    street: Option<&'a str>,
    zip: Option<&'a str>,
    city: Option<&'a str>,
}

impl PendingAddress<'_> {
    fn finish(self, kind: AddressKind) -> Option<Address> {
        let is_present = [self.street, self.zip, self.city]
            .into_iter()
            .any(|part| part.is_some_and(|text| !text.is_empty()));
        is_present.then(|| Address {
            kind,
            street: self.street.unwrap_or_default().to_string(),
            zip: self.zip.unwrap_or_default().to_string(),
            city: self.city.unwrap_or_default().to_string(),
        })
    }
}

fn project_row(
    key: RowKey,
    cells: &CellMap,
    document: &MorkDocument,
    options: &ProjectOptions,
    warnings: &mut Vec<Warning>,
) -> Option<Contact> {
    let mut name = None;
    let mut numbers = Vec::new();
    let mut company = None;
    let mut photo = None;
    let mut home = PendingAddress::default();
    let mut work = PendingAddress::default();

    for (column_id, value_id) in cells.iter() {
        if column_id == 0 {
            continue;
        }
        let Some(column) = document.columns.lookup(column_id) else {
            warnings.push(Warning::UnresolvableColumn {
                row: key,
                column: column_id,
            });
            continue;
        };
        let Some(value) = document.values.lookup(value_id) else {
            warnings.push(Warning::UnresolvableValue {
                row: key,
                column: column_id,
                value: value_id,
            });
            continue;
        };

        let phone = |kind| PhoneNumber {
            number: value.to_string(),
            kind,
        };
        match column {
            "DisplayName" => name = Some(value),
            "HomePhone" => numbers.push(phone(PhoneType::Home)),
            "WorkPhone" => numbers.push(phone(PhoneType::Work)),
            "FaxNumber" => numbers.push(phone(PhoneType::FaxHome)),
            "CellularNumber" => numbers.push(phone(PhoneType::Mobile)),
            "Company" => company = Some(value.to_string()),
            "HomeAddress" => home.street = Some(value),
            "HomeCity" => home.city = Some(value),
            "HomeZipCode" => home.zip = Some(value),
            "WorkAddress" => work.street = Some(value),
            "WorkCity" => work.city = Some(value),
            "WorkZipCode" => work.zip = Some(value),
            "PhotoName" => photo = Some(options.photo_path(value)),
            _ => {}
        }
    }

    let name = name.filter(|name| !name.is_empty())?;
    tracing::trace!(row = %key, name, "Projected contact");

    let addresses = [
        home.finish(AddressKind::Home),
        work.finish(AddressKind::Work),
    ]
    .into_iter()
    .flatten()
    .collect();

    Some(Contact {
        name: name.to_string(),
        numbers,
        company,
        addresses,
        photo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::AtomTable;
    use crate::store::Store;

    const NAME: i32 = 0x80;
    const HOME_PHONE: i32 = 0x81;
    const HOME_CITY: i32 = 0x82;
    const WORK_ADDRESS: i32 = 0x83;
    const PHOTO: i32 = 0x84;
    const NICK: i32 = 0x85;

    struct Builder {
        document: MorkDocument,
        next_value: i32,
        next_row: i32,
    }

    impl Builder {
        fn new() -> Self {
            let mut columns = AtomTable::new();
            for (id, name) in [
                (NAME, "DisplayName"),
                (HOME_PHONE, "HomePhone"),
                (HOME_CITY, "HomeCity"),
                (WORK_ADDRESS, "WorkAddress"),
                (PHOTO, "PhotoName"),
                (NICK, "NickName"),
            ] {
                columns.insert(id, name);
            }
            Self {
                document: MorkDocument {
                    columns,
                    values: AtomTable::new(),
                    store: Store::new(),
                },
                next_value: 1,
                next_row: 1,
            }
        }

        fn row(mut self, cells: &[(i32, &str)]) -> Self {
            let key = RowKey::new(0x80, 1, 0x80, self.next_row);
            self.next_row += 1;
            for &(column, text) in cells {
                let value = self.next_value;
                self.next_value += 1;
                self.document.values.insert(value, text);
                self.document.store.row_mut(key).insert(column, value);
            }
            self
        }

        fn names(&self) -> Vec<String> {
            project(&self.document, &ProjectOptions::default())
                .into_iter()
                .map(|contact| contact.name)
                .collect()
        }
    }

    #[test]
    fn row_without_name_is_dropped() {
        let builder = Builder::new().row(&[(HOME_PHONE, "1"), (HOME_CITY, "Town")]);
        assert!(builder.names().is_empty());
    }

    #[test]
    fn row_with_empty_name_is_dropped() {
        let builder = Builder::new().row(&[(NAME, ""), (HOME_PHONE, "1")]);
        assert!(builder.names().is_empty());
    }

    #[test]
    fn contacts_are_sorted_bytewise() {
        let builder = Builder::new()
            .row(&[(NAME, "Bob")])
            .row(&[(NAME, "alice")])
            .row(&[(NAME, "Charlie")]);
        assert_eq!(builder.names(), vec!["Bob", "Charlie", "alice"]);
    }

    #[test]
    fn equal_names_keep_visit_order() {
        let builder = Builder::new()
            .row(&[(NAME, "Sam"), (HOME_PHONE, "1")])
            .row(&[(NAME, "Sam"), (HOME_PHONE, "2")]);
        let contacts = project(&builder.document, &ProjectOptions::default());
        assert_eq!(contacts[0].numbers[0].number, "1");
        assert_eq!(contacts[1].numbers[0].number, "2");
    }

    #[test]
    fn partial_address_is_attached() {
        let builder = Builder::new().row(&[(NAME, "Ann"), (HOME_CITY, "Berlin")]);
        let contacts = project(&builder.document, &ProjectOptions::default());
        let home = contacts[0].address(AddressKind::Home).unwrap();
        assert_eq!(home.city, "Berlin");
        assert_eq!(home.street, "");
        assert!(contacts[0].address(AddressKind::Work).is_none());
    }

    #[test]
    fn address_with_only_empty_parts_is_dropped() {
        let builder = Builder::new().row(&[(NAME, "Ann"), (WORK_ADDRESS, "")]);
        let contacts = project(&builder.document, &ProjectOptions::default());
        assert!(contacts[0].addresses.is_empty());
    }

    #[test]
    fn photo_is_resolved_below_profile() {
        let builder = Builder::new().row(&[(NAME, "Ann"), (PHOTO, "ann.jpg")]);
        let options = ProjectOptions::with_profile_dir("/home/u/.thunderbird/p");
        let contacts = project(&builder.document, &options);
        let expected = Path::new("/home/u/.thunderbird/p")
            .join("Photos")
            .join("ann.jpg");
        assert_eq!(contacts[0].photo.as_deref(), expected.to_str());
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let builder = Builder::new().row(&[(NAME, "Ann"), (NICK, "annie")]);
        let contacts = project(&builder.document, &ProjectOptions::default());
        assert!(contacts[0].numbers.is_empty());
        assert!(contacts[0].company.is_none());
    }

    #[test]
    fn unresolvable_cells_are_skipped_and_reported() {
        let mut builder = Builder::new().row(&[(NAME, "Ann"), (HOME_PHONE, "1")]);
        let key = RowKey::new(0x80, 1, 0x80, 1);
        builder.document.store.row_mut(key).insert(0x99, 1);
        builder.document.store.row_mut(key).insert(HOME_CITY, 500);

        let mut warnings = Vec::new();
        let contacts =
            project_collecting(&builder.document, &ProjectOptions::default(), &mut warnings);

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].numbers.len(), 1);
        assert!(contacts[0].addresses.is_empty());
        let kinds: Vec<&str> = warnings.iter().map(Warning::kind).collect();
        assert_eq!(kinds, vec!["unresolvable_value", "unresolvable_column"]);
    }

    #[test]
    fn column_zero_is_never_projected() {
        let mut builder = Builder::new().row(&[(NAME, "Ann")]);
        builder.document.columns.insert(0, "HomePhone");
        let key = RowKey::new(0x80, 1, 0x80, 1);
        builder.document.store.row_mut(key).insert(0, 1);

        let mut warnings = Vec::new();
        let contacts =
            project_collecting(&builder.document, &ProjectOptions::default(), &mut warnings);
        assert!(contacts[0].numbers.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn warnings_are_appended_after_existing_entries() {
        let mut builder = Builder::new().row(&[(NAME, "Ann")]);
        let key = RowKey::new(0x80, 1, 0x80, 1);
        builder.document.store.row_mut(key).insert(0x99, 1);
        let earlier = Warning::UnresolvableColumn {
            row: RowKey::new(0x80, 2, 0x80, 9),
            column: 0x42,
        };

        let mut warnings = vec![earlier.clone()];
        let contacts =
            project_collecting(&builder.document, &ProjectOptions::default(), &mut warnings);

        assert_eq!(contacts.len(), 1);
        assert_eq!(
            warnings,
            vec![
                earlier,
                Warning::UnresolvableColumn {
                    row: key,
                    column: 0x99
                },
            ]
        );
    }
}

//! Property tests for the decoder.

use std::collections::HashSet;
use std::fmt::Write;

use mork::atom::SYNTHETIC_ID_START;
use mork::{ProjectOptions, RowKey, decode, read_address_book};
use proptest::prelude::*;

fn hex_escape(text: &str) -> String {
    text.bytes().fold(String::new(), |mut out, byte| {
        let _ = write!(out, "${byte:02X}");
        out
    })
}

proptest! {
    #[test]
    fn hex_escapes_round_trip(text in any::<String>().prop_filter("no NUL", |s| !s.contains('\0'))) {
        let data = format!("<(A0={})>", hex_escape(&text));

        let doc = decode(data.as_bytes()).unwrap();

        let expected = (!text.is_empty()).then_some(text.as_str());
        prop_assert_eq!(doc.values.lookup(0xA0), expected);
    }

    #[test]
    fn inline_literals_get_unique_synthetic_ids(count in 1usize..64) {
        let mut data = String::from("[1");
        for column in 1..=count {
            write!(data, "(^{column:X}=v{column})").unwrap();
        }
        data.push(']');

        let doc = decode(data.as_bytes()).unwrap();
        let row = doc.store.get(&RowKey::new(0x80, 1, 0x80, 1)).unwrap();

        let ids: HashSet<i32> = row.iter().map(|(_, value)| value).collect();
        prop_assert_eq!(ids.len(), count);
        for id in ids {
            prop_assert!(id < 0);
            prop_assert!(id < SYNTHETIC_ID_START);
            prop_assert!(doc.values.lookup(id).is_some());
        }
    }

    #[test]
    fn contacts_are_always_name_sorted(names in prop::collection::vec("[A-Za-z]{1,8}", 0..20)) {
        let mut data = String::from("< <(a=c)> (80=DisplayName)>\n{1:^80 ");
        for (row, name) in names.iter().enumerate() {
            write!(data, "[{:X}(^80={name})]", row + 1).unwrap();
        }
        data.push('}');

        let book = read_address_book(data.as_bytes(), &ProjectOptions::default()).unwrap();

        let got: Vec<&str> = book.contacts.iter().map(|c| c.name.as_str()).collect();
        let mut expected: Vec<&str> = names.iter().map(String::as_str).collect();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }
}

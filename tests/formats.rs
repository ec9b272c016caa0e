//! Output format snapshots

use yamlet_parser::parse;
use yamlet_parser::yamlet::formats::{FormatError, FormatRegistry};

const DOCUMENT: &str = "\
title: Harbour House
year: 2021
cover:
  src: /images/cover.jpg
  alt:
tags: [residential, timber frame]
team:
  - name: Ana Ruiz
    lead: true
";

fn render(format: &str) -> String {
    let doc = parse(DOCUMENT).unwrap();
    FormatRegistry::with_defaults().serialize(&doc, format).unwrap()
}

#[test]
fn test_treeviz_snapshot() {
    insta::assert_snapshot!(render("treeviz"), @r###"
    ⧉ document (5 entries)
    ├─ ◦ title: "Harbour House"
    ├─ ◦ year: 2021
    ├─ ≔ cover (2 entries)
    │  ├─ ◦ src: "/images/cover.jpg"
    │  └─ ◦ alt: null
    ├─ ☰ tags (2 items)
    │  ├─ • "residential"
    │  └─ • "timber frame"
    └─ ☰ team (1 item)
       └─ ≔ [0] (2 entries)
          ├─ ◦ name: "Ana Ruiz"
          └─ ◦ lead: true
    "###);
}

#[test]
fn test_json_snapshot() {
    insta::assert_snapshot!(render("json"), @r###"
    {
      "title": "Harbour House",
      "year": 2021,
      "cover": {
        "src": "/images/cover.jpg",
        "alt": null
      },
      "tags": [
        "residential",
        "timber frame"
      ],
      "team": [
        {
          "name": "Ana Ruiz",
          "lead": true
        }
      ]
    }
    "###);
}

#[test]
fn test_yaml_snapshot() {
    insta::assert_snapshot!(render("yaml"), @r###"
    title: Harbour House
    year: 2021
    cover:
      src: /images/cover.jpg
      alt: null
    tags:
    - residential
    - timber frame
    team:
    - name: Ana Ruiz
      lead: true
    "###);
}

#[test]
fn test_unknown_format() {
    let doc = parse(DOCUMENT).unwrap();
    assert_eq!(
        FormatRegistry::with_defaults().serialize(&doc, "toml"),
        Err(FormatError::FormatNotFound("toml".into()))
    );
}

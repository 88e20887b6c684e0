use proptest::prelude::*;

use fontload_core::fontface::{format_hint, FontFace};
use fontload_core::provider::{resolve, Provider};
use fontload_core::FontRequest;

fn alias_strategy() -> impl Strategy<Value = (Provider, &'static str)> {
    let pairs: Vec<(Provider, &'static str)> = Provider::ALL
        .iter()
        .flat_map(|p| p.aliases().iter().map(move |a| (*p, *a)))
        .collect();
    proptest::sample::select(pairs)
}

proptest! {
    #[test]
    fn aliases_resolve_regardless_of_case((provider, alias) in alias_strategy(), mask in any::<u64>()) {
        let mixed: String = alias
            .chars()
            .enumerate()
            .map(|(i, c)| if mask >> (i % 64) & 1 == 1 { c.to_ascii_uppercase() } else { c })
            .collect();

        // The configuration never overrides an explicit alias.
        let config = FontRequest::new().with("projectId", "abc");
        prop_assert_eq!(resolve(Some(mixed.as_str()), &config), Ok(provider));
    }

    #[test]
    fn font_face_rendering_is_pure(
        name in "[A-Za-z][A-Za-z ]{0,20}",
        stem in "[a-z0-9/_-]{1,16}",
        ext in prop::sample::select(vec!["woff", "woff2", "ttf", "otf", "svg", "eot", "bin"]),
        weight in prop::option::of("[1-9]00"),
        style in prop::option::of(prop::sample::select(vec!["normal", "italic", "oblique"])),
        display in prop::option::of(prop::sample::select(vec!["auto", "block", "swap", "fallback", "optional"])),
    ) {
        let src = format!("{stem}.{ext}");
        let build = || {
            FontFace::new(name.clone(), src.clone())
                .weight(weight.clone())
                .style(style.map(str::to_string))
                .display(display.map(str::to_string))
                .to_css()
        };

        let first = build();
        prop_assert_eq!(&first, &build());
        let expected_hint = format!("format('{}')", format_hint(&src));
        prop_assert!(first.contains(&expected_hint));
        let expected_display = format!("font-display: {};", display.unwrap_or("swap"));
        prop_assert!(first.contains(&expected_display));
    }
}

#[test]
fn every_alias_group_agrees() {
    for provider in Provider::ALL {
        let resolved: Vec<Provider> = provider
            .aliases()
            .iter()
            .map(|alias| alias.parse::<Provider>().expect("known alias"))
            .collect();
        assert!(resolved.iter().all(|p| *p == provider), "{provider}: {resolved:?}");
    }
}

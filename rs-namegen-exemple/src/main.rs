use std::rc::Rc;

use rs_namegen_core::engine::Engine;
use rs_namegen_core::origin::component::NameComponent;
use rs_namegen_core::origin::composition::NameComposition;
use rs_namegen_core::origin::origin::Origin;
use rs_namegen_core::process::char_group_pattern::{CharGroupPatternParameters, CharGroupPatternProcess};
use rs_namegen_core::process::markov::{MarkovParameters, MarkovProcess};
use rs_namegen_core::process::raw_list::RawListProcess;
use rs_namegen_core::process::weighted_list::{WeightedListParameters, WeightedListProcess};
use rs_namegen_core::process::{DictionaryEntry, Formatting, Process};
use rs_namegen_core::serializer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A Markov process learns the style of its training terms.
    // Order 2 means the last two characters drive the next pick.
    let mut first_names = MarkovProcess::new(
        "first-names",
        MarkovParameters {
            order: 2,
            min_length: 3,
            max_length: 10,
            // Never return a training term verbatim; give up with a
            // Generation error after 50 failed attempts
            allow_duplicates: false,
            max_attempts: 50,
            formatting: Formatting { uppercase_first: true, minimize: true, ..Formatting::default() },
            ..MarkovParameters::default()
        },
    )?;
    first_names.add_list_to_dictionary(
        ["anna", "anja", "annika", "maria", "marina", "sabrina", "katarina"]
            .into_iter()
            .map(|term| DictionaryEntry::Term(term.to_owned()))
            .collect(),
    )?;

    // A weighted list picks common family names more often than rare ones.
    let mut family_names = WeightedListProcess::new("family-names", WeightedListParameters::default())?;
    family_names.add_list_to_dictionary(vec![
        DictionaryEntry::Weighted("Smith".to_owned(), 5),
        DictionaryEntry::Weighted("Miller".to_owned(), 3),
        DictionaryEntry::Weighted("Ashford".to_owned(), 1),
    ])?;

    // A char-group pattern builds short clan names from consonant/vowel
    // groups; the '-' has no matching group and passes through literally.
    let mut clan_names = CharGroupPatternProcess::new(
        "clan-names",
        CharGroupPatternParameters {
            pattern: Some("cvc-cv".to_owned()),
            formatting: Formatting { uppercase_first: true, ..Formatting::default() },
        },
    )?;
    clan_names.add_list_to_dictionary(vec![
        DictionaryEntry::KeyedGroup(vec!["a".into(), "e".into(), "o".into()], "v".to_owned()),
        DictionaryEntry::KeyedGroup(vec!["k".into(), "r".into(), "th".into()], "c".to_owned()),
    ])?;

    // A raw list is a plain uniform pick.
    let mut titles = RawListProcess::new("titles", Formatting::default())?;
    titles.add_list_to_dictionary(
        ["the Bold", "the Wise", "of the North"]
            .into_iter()
            .map(|term| DictionaryEntry::Term(term.to_owned()))
            .collect(),
    )?;

    // Invalid input fails fast with a categorized error.
    match family_names.add_to_dictionary(DictionaryEntry::Weighted("Nobody".to_owned(), 0)) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Zero weight rejected: {e}"),
    }

    // Processes generate on their own...
    for _ in 0..3 {
        println!("first name: {}", first_names.generate()?);
    }
    println!("clan name: {}", clan_names.generate()?);

    // ...or get composed. Components wrap shared processes, a
    // composition arranges them along a pattern of part keys, origins
    // weight the compositions, and the engine weights the origins.
    let first: Rc<dyn Process> = Rc::new(first_names);
    let family: Rc<dyn Process> = Rc::new(family_names);
    let clan: Rc<dyn Process> = Rc::new(clan_names);
    let title: Rc<dyn Process> = Rc::new(titles);

    let mut northern = NameComposition::new(
        "northern",
        vec!["first".to_owned(), "clan".to_owned(), "title".to_owned()],
    )?;
    northern.add_component(Rc::new(NameComponent::new("first", Rc::clone(&first))?), "first")?;
    northern.add_component(Rc::new(NameComponent::new("clan", clan)?), "clan")?;
    northern.add_component(Rc::new(NameComponent::new("title", title)?), "title")?;

    let mut common = NameComposition::new("common", vec!["first".to_owned(), "family".to_owned()])?;
    common.add_component(Rc::new(NameComponent::new("first", first)?), "first")?;
    common.add_component(Rc::new(NameComponent::new("family", family)?), "family")?;

    let mut kingdom = Origin::new("kingdom")?;
    kingdom.add_composition(Rc::new(common), "default", 3)?;
    kingdom.add_composition(Rc::new(northern), "northern", 1)?;

    let mut engine = Engine::new();
    engine.add_origin(Rc::new(kingdom), 1)?;

    for i in 0..5 {
        let name = engine.generate_name()?;
        println!("Generated name {}: {}", i + 1, name.plain);
    }

    // The whole configuration exports to a declarative JSON document
    // and re-imports into an equivalent engine.
    let document = serializer::json_encode(&serializer::serialize_engine(&engine)?)?;
    println!("Exported configuration: {} bytes", document.len());

    let imported = serializer::parse_engine(&serializer::json_decode(&document)?)?;
    println!("Re-imported name: {}", imported.generate_name()?.plain);

    Ok(())
}

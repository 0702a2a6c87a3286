use anyhow::Result;
use common::types::Person;

use super::setup_test_db;
use crate::person;

fn sample(name: &str, color: &str, color_id: i32) -> Person {
    Person {
        name: name.into(),
        lastname: "Müller".into(),
        zipcode: "67742".into(),
        city: "Lauterecken".into(),
        color: color.into(),
        color_id,
        ..Person::default()
    }
}

/// Insert assigns increasing ids and round-trips every column
#[tokio::test]
async fn test_person_insert_and_find() -> Result<()> {
    let db = setup_test_db().await?;

    let first = person::insert(&db, &sample("Hans", "blau", 1)).await?;
    let second = person::insert(&db, &sample("Peter", "grün", 2)).await?;
    assert!(first.id > 0);
    assert!(second.id > first.id);

    let found = person::find_by_id(&db, first.id).await?.expect("inserted row");
    assert_eq!(found, first);
    let as_person: Person = found.into();
    assert_eq!(as_person.lastname, "Müller");
    assert_eq!(as_person.zipcode, "67742");
    assert_eq!(as_person.color, "blau");
    assert_eq!(as_person.color_id, 1);
    assert_eq!(as_person.id, first.id);

    assert!(person::find_by_id(&db, second.id + 100).await?.is_none());

    let all = person::find_all(&db).await?;
    assert_eq!(all.iter().map(|m| m.id).collect::<Vec<_>>(), vec![first.id, second.id]);
    Ok(())
}

/// Color lookups go by id
#[tokio::test]
async fn test_find_by_color_id() -> Result<()> {
    let db = setup_test_db().await?;

    let a = person::insert(&db, &sample("A", "rot", 4)).await?;
    let b = person::insert(&db, &sample("B", "rot", 4)).await?;
    person::insert(&db, &sample("C", "blau", 1)).await?;

    let reds = person::find_by_color_id(&db, 4).await?;
    assert_eq!(reds.iter().map(|m| m.id).collect::<Vec<_>>(), vec![a.id, b.id]);

    assert!(person::find_by_color_id(&db, 2).await?.is_empty());
    Ok(())
}

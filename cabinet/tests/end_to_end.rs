use cabinet::cabinet_rest::MockBackend;
use cabinet::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_directory_through_the_prelude() {
    let mock = MockBackend::new();
    mock.push_json(
        200,
        json!([
            {"id": "a1", "prenom": "Amir", "nom": "Haddad", "fonction": "Premier ministre", "rang": 1},
            {"id": "b2", "prenom": "Zoé", "nom": "Bernard", "fonction": "Ministre de la Santé", "rang": 2}
        ]),
    );
    mock.push_json(
        200,
        json!([
            {"rubrique": "Formation", "titre": "Master de droit public", "periode": "2004-2006", "date_fin": "2006"},
            {"rubrique": "Gouvernement", "titre": "Ministre de la Santé", "date_debut": "2024-01-11"},
            {"evenement": "Nomination", "date_evenement": "11 janvier 2024", "categorie": "Gouvernement", "ordre": 0}
        ]),
    );

    let client = RestClient::with_backend(
        &RestConfig::new("https://db.example.co", "anon"),
        mock.clone(),
    )
    .unwrap();
    let context = DirectoryContext::with_client(
        client,
        DirectoryConfig::new().with_careers_table("parcours"),
    );

    let page = context
        .search(&DirectoryQuery::new().with_search("santé"))
        .await
        .unwrap();
    assert_eq!(page.total_elements, 1);
    let id = page.content[0].id.clone().unwrap();
    assert_eq!(id, "b2");

    let groups = context.biography_groups(&id).await.unwrap();
    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, ["Gouvernement", "Formation académique"]);

    let government = &groups[0].entries;
    assert_eq!(government[0].event_text.as_deref(), Some("Nomination"));
    assert_eq!(period_label(&government[0]), "2024");
    assert_eq!(period_label(&government[1]), "Depuis 2024");
    assert_eq!(period_label(&groups[1].entries[0]), "2004 – 2006");

    assert_eq!(mock.requests().len(), 2);
}

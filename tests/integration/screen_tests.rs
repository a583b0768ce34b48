//! A list screen wired end to end: table, row actions, dialogs, writes.

use shopdesk::forms::{FieldErrors, FormErrors};
use shopdesk::projection::{ActionKind, Cell, RowActions};
use shopdesk::resources::card_brand::{self, CardBrand};
use shopdesk::selection::{Selection, SelectionContext};
use shopdesk::{Error, ErrorCategory, QueryParams, RecordId, RecordStatus, SortDirection};

use crate::common::{brand_transport, client_with, twelve_brands};

#[tokio::test]
async fn test_edit_dialog_round_trip() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();
    let selection = SelectionContext::<CardBrand>::new();
    let table = card_brand::columns(RowActions::with_selection(&selection));

    let page = list.load().await.unwrap();
    let rows = table.project_page(&page);
    assert_eq!(rows.len(), 10);
    assert_eq!(
        rows[0].cells.last(),
        Some(&Cell::Actions(vec![ActionKind::View, ActionKind::Edit, ActionKind::Delete]))
    );

    // Clicking "Editar" on the first row opens the edit form for Visa.
    let actions = RowActions::with_selection(&selection);
    assert!(actions.trigger(ActionKind::Edit, &page.items[0]));
    let mut editing = selection.editing().unwrap();
    assert_eq!(editing.descricao, "Visa");

    editing.descricao = "Visa Electron".into();
    list.update(&RecordId::from(editing.id), editing)
        .await
        .unwrap();
    selection.submitted();

    assert_eq!(selection.current(), Selection::None);
    assert_eq!(list.state().items()[0].descricao, "Visa Electron");
}

#[tokio::test]
async fn test_delete_confirmation_refreshes_list() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();
    let selection = SelectionContext::<CardBrand>::new();

    let page = list.load().await.unwrap();
    assert_eq!(page.info.total_items, 12);

    selection.delete(page.items[1].clone());
    let target = selection.deleting().unwrap();
    list.delete(&RecordId::from(target.id)).await.unwrap();
    selection.submitted();

    let state = list.state();
    assert_eq!(state.page.unwrap().info.total_items, 11);
    assert!(selection.current().is_none());
    assert_eq!(list.stats().snapshot().writes, 1);
}

#[tokio::test]
async fn test_status_toggle_through_row_actions() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();
    list.filter_by_status(Some(RecordStatus::Inactive)).await.unwrap();

    let inactive = list.state().items()[0].clone();
    let table = card_brand::columns(RowActions::new().on_activate(|_: &CardBrand| {}));
    let row = table.project_row(&inactive);
    assert_eq!(row.cells.last().map(ToString::to_string).as_deref(), Some("Ativar"));

    let activated = list.toggle_status(&inactive).await.unwrap();
    assert_eq!(activated.status, RecordStatus::Active);
    assert_eq!(list.state().page.unwrap().info.total_items, 2);
}

#[tokio::test]
async fn test_validation_error_maps_onto_form() {
    let client = client_with(twelve_brands()).unwrap();
    let transport = brand_transport(&client).unwrap();
    let list = client.resource::<CardBrand>().list_controller();
    list.load().await.unwrap();

    transport.set_failure(Error::validation(
        FieldErrors::new()
            .with_message("Dados inválidos")
            .with_field("descricao", "já cadastrada")
            .with_field("codigo_bandeira", "inválido"),
    ));
    let err = list
        .create(CardBrand::new(13, "Visa", RecordStatus::Active))
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);

    let form = FormErrors::from_error(&err, &card_brand::field_map());
    assert_eq!(form.first("description"), Some("já cadastrada"));
    assert_eq!(form.form_messages(), &["codigo_bandeira: inválido".to_string()]);

    // The list keeps its prior state.
    let state = list.state();
    assert_eq!(state.page.unwrap().info.total_items, 12);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_headers_follow_sort_clicks() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();
    let table = card_brand::columns(RowActions::new());

    let field = table.sort_field_for("descricao").unwrap();
    list.set_sort(field).await.unwrap();
    list.set_sort(field).await.unwrap();

    let query = list.query();
    assert_eq!(
        query,
        QueryParams::new().with_sort("descricao", SortDirection::Desc)
    );
    let headers: Vec<String> = table.headers(&query).iter().map(ToString::to_string).collect();
    assert_eq!(headers, ["Código ⇅", "Descrição ▼", "Situação ⇅", "Ações"]);
    assert_eq!(table.sort_field_for("acoes"), None);
}

#[tokio::test]
async fn test_delete_from_detail_screen_reaches_open_list() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();
    list.load().await.unwrap();

    // Another screen deletes through its own resource client.
    client.resource::<CardBrand>().delete(1u64).await.unwrap();

    list.set_search_text("x").await.unwrap();
    let page = list.set_search_text("").await.unwrap();
    assert_eq!(page.info.total_items, 11);
    assert!(page.items.iter().all(|brand| brand.id != 1));
}

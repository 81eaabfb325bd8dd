//! Lane editing flows through the public API, with a recording store

use async_trait::async_trait;
use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
};

use circulation_admin::{
    editor::{
        Confirm, EditorState, LaneCollaborators, LaneEditor, LaneForm, LaneStore, Navigator,
        Visibility, VisibilityAction,
    },
    models::{CustomList, Lane, LaneTree, SavedLane},
    AdminError, AdminResult, Confirmation,
};

#[derive(Default)]
struct RecordingStore {
    forms: Mutex<Vec<LaneForm>>,
    deleted: Mutex<Vec<i32>>,
    toggled: Mutex<Vec<i32>>,
    next_id: i32,
    fail_saves: bool,
}

#[async_trait]
impl LaneStore for RecordingStore {
    async fn edit_lane(&self, form: &LaneForm) -> AdminResult<SavedLane> {
        self.forms.lock().unwrap().push(form.clone());
        if self.fail_saves {
            return Err(AdminError::SaveFailure("server unavailable".to_string()));
        }
        let id = form
            .get("id")
            .and_then(|id| id.parse().ok())
            .unwrap_or(self.next_id);
        Ok(SavedLane { id })
    }

    async fn delete_lane(&self, lane: &Lane) -> AdminResult<()> {
        self.deleted.lock().unwrap().push(lane.id);
        Ok(())
    }

    async fn toggle_lane_visibility(&self, lane: &Lane) -> AdminResult<()> {
        self.toggled.lock().unwrap().push(lane.id);
        Ok(())
    }
}

struct Answer(bool, Mutex<Vec<String>>);

impl Confirm for Answer {
    fn confirm(&self, message: &str) -> bool {
        self.1.lock().unwrap().push(message.to_string());
        self.0
    }
}

#[derive(Default)]
struct RecordingNavigator(Mutex<Vec<String>>);

impl Navigator for RecordingNavigator {
    fn navigate(&self, location: &str) {
        self.0.lock().unwrap().push(location.to_string());
    }
}

fn lane(id: i32, name: &str, visible: bool, lists: &[i32], sublanes: Vec<Lane>) -> Lane {
    Lane {
        id,
        display_name: name.to_string(),
        visible,
        count: 0,
        sublanes,
        custom_list_ids: lists.iter().copied().collect(),
        inherit_parent_restrictions: true,
    }
}

fn tree() -> LaneTree {
    LaneTree::new(vec![
        lane(1, "Fiction", true, &[1], vec![
            lane(2, "Mystery", true, &[1], vec![]),
            lane(3, "Romance", false, &[], vec![lane(4, "Regency", true, &[2], vec![])]),
        ]),
        lane(5, "Nonfiction", true, &[], vec![]),
    ])
}

fn custom_lists() -> Vec<CustomList> {
    vec![
        CustomList { id: 1, name: "Staff Picks".to_string(), entry_count: 12 },
        CustomList { id: 2, name: "Award Winners".to_string(), entry_count: 3 },
    ]
}

struct Fixture {
    store: Arc<RecordingStore>,
    confirm: Arc<Answer>,
    navigator: Arc<RecordingNavigator>,
}

impl Fixture {
    fn new(store: RecordingStore, answer: bool) -> Self {
        Self {
            store: Arc::new(store),
            confirm: Arc::new(Answer(answer, Mutex::new(Vec::new()))),
            navigator: Arc::new(RecordingNavigator::default()),
        }
    }

    fn editor(&self, tree: LaneTree, lane_id: Option<i32>) -> LaneEditor {
        let lane = lane_id.and_then(|id| tree.find(id).cloned());
        LaneEditor::new(
            "nypl",
            lane,
            custom_lists(),
            LaneCollaborators {
                store: self.store.clone(),
                parents: Arc::new(tree),
                confirm: self.confirm.clone(),
                navigator: self.navigator.clone(),
            },
        )
    }
}

#[tokio::test]
async fn test_edit_sublane_and_save() {
    let fixture = Fixture::new(RecordingStore::default(), true);
    let mut editor = fixture.editor(tree(), Some(2));
    assert_eq!(editor.parent_info().to_string(), "sublane of Fiction");

    editor.change_name("Crime").unwrap();
    editor.add_custom_list(2).unwrap();
    editor.change_inherit_parent_restrictions().unwrap();
    assert_eq!(editor.state(), EditorState::Editing);

    editor.save().await.unwrap();

    let forms = fixture.store.forms.lock().unwrap();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].get("id"), Some("2"));
    assert_eq!(forms[0].get("parent_id"), Some("1"));
    assert_eq!(forms[0].get("display_name"), Some("Crime"));
    assert_eq!(forms[0].get("custom_list_ids"), Some("[1,2]"));
    assert_eq!(forms[0].get("inherit_parent_restrictions"), Some("false"));
    assert_eq!(editor.state(), EditorState::Viewing);
    assert!(fixture.navigator.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_lane_under_parent_then_navigate() {
    let fixture = Fixture::new(RecordingStore { next_id: 42, ..Default::default() }, true);
    let mut editor = fixture.editor(tree().for_new_lane_under(Some(5)), None);
    assert_eq!(editor.parent_info().to_string(), "sublane of Nonfiction");
    assert_eq!(editor.inherit_parent_restrictions(), Some(false));

    editor.change_name("Biography").unwrap();
    let saved = editor.save().await.unwrap();

    assert_eq!(saved.id, 42);
    let forms = fixture.store.forms.lock().unwrap();
    assert_eq!(forms[0].get("id"), None);
    assert_eq!(forms[0].get("parent_id"), Some("5"));
    assert_eq!(
        fixture.navigator.0.lock().unwrap().as_slice(),
        ["/admin/web/lanes/nypl/edit/42".to_string()]
    );
}

#[tokio::test]
async fn test_failed_save_then_cancel() {
    let fixture = Fixture::new(RecordingStore { fail_saves: true, ..Default::default() }, true);
    let mut editor = fixture.editor(tree(), Some(5));

    editor.change_custom_lists([2]).unwrap();
    assert!(editor.save().await.is_err());
    assert_eq!(editor.state(), EditorState::Editing);
    assert_eq!(editor.custom_lists().membership(), &BTreeSet::from([2]));

    editor.cancel().unwrap();
    assert_eq!(editor.custom_lists().membership(), &BTreeSet::new());
    assert_eq!(editor.state(), EditorState::Viewing);
}

#[tokio::test]
async fn test_hidden_parent_blocks_visibility_toggle() {
    let fixture = Fixture::new(RecordingStore::default(), true);
    let mut editor = fixture.editor(tree(), Some(4));

    assert_eq!(
        editor.visibility(),
        Some(Visibility::HiddenByParent("Romance".to_string()))
    );
    assert_eq!(editor.visibility_action(), None);
    assert!(editor.toggle_visibility().await.is_err());
    assert!(fixture.store.toggled.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_declined_prompts_change_nothing() {
    let fixture = Fixture::new(RecordingStore::default(), false);
    let mut editor = fixture.editor(tree(), Some(5));

    assert_eq!(editor.visibility_action(), Some(VisibilityAction::Hide));
    assert_eq!(editor.toggle_visibility().await.unwrap(), Confirmation::Declined);
    assert_eq!(editor.delete().await.unwrap(), Confirmation::Declined);

    assert_eq!(fixture.confirm.1.lock().unwrap().len(), 2);
    assert!(fixture.store.toggled.lock().unwrap().is_empty());
    assert!(fixture.store.deleted.lock().unwrap().is_empty());
    assert_eq!(editor.state(), EditorState::Viewing);
}

#[tokio::test]
async fn test_showing_skips_prompt_and_store_drives_update() {
    let fixture = Fixture::new(RecordingStore::default(), false);
    let mut editor = fixture.editor(tree(), Some(3));

    assert_eq!(editor.toggle_visibility().await.unwrap(), Confirmation::Confirmed);
    assert!(fixture.confirm.1.lock().unwrap().is_empty());
    assert_eq!(fixture.store.toggled.lock().unwrap().as_slice(), [3]);
    assert_eq!(editor.visibility(), Some(Visibility::Hidden));

    let mut shown = tree().find(3).cloned().unwrap();
    shown.visible = true;
    editor.bind(Some(shown));
    assert_eq!(editor.visibility(), Some(Visibility::Visible));
}

#[tokio::test]
async fn test_delete_is_terminal() {
    let fixture = Fixture::new(RecordingStore::default(), true);
    let mut editor = fixture.editor(tree(), Some(5));

    assert_eq!(editor.delete().await.unwrap(), Confirmation::Confirmed);
    assert_eq!(fixture.store.deleted.lock().unwrap().as_slice(), [5]);
    assert_eq!(editor.state(), EditorState::Deleted);
    assert!(editor.save().await.is_err());
    assert!(editor.cancel().is_err());
}

#[tokio::test]
async fn test_fresh_tree_and_lists_reach_open_editor() {
    let fixture = Fixture::new(RecordingStore::default(), true);
    let mut editor = fixture.editor(tree(), Some(4));
    assert_eq!(editor.visibility_action(), None);
    assert!(matches!(editor.add_custom_list(3), Err(AdminError::NotFound(_))));

    let mut romance = tree().find(3).cloned().unwrap();
    romance.visible = true;
    let refreshed = LaneTree::new(vec![
        lane(1, "Fiction", true, &[1], vec![
            lane(2, "Mystery", true, &[1], vec![]),
            romance,
        ]),
        lane(5, "Nonfiction", true, &[], vec![]),
    ]);
    editor.set_parent_lookup(Arc::new(refreshed));

    let mut lists = custom_lists();
    lists.push(CustomList { id: 3, name: "New Arrivals".to_string(), entry_count: 0 });
    editor.set_custom_lists(lists);

    assert_eq!(editor.visibility(), Some(Visibility::Visible));
    assert_eq!(editor.visibility_action(), Some(VisibilityAction::Hide));
    editor.add_custom_list(3).unwrap();
    assert_eq!(editor.custom_lists().membership(), &BTreeSet::from([2, 3]));
    assert_eq!(editor.state(), EditorState::Editing);
}

//! Right-click entry point for the editor.

use imagemap_core::ImageAttributes;

use crate::editor::{CanvasBox, EditorSession, EditorSettings};

pub const EDIT_IMAGE_MAP_TITLE: &str = "Edit Image Map";

/// What a menu entry does when chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    /// Open the editor for the image with these attributes.
    EditImageMap(ImageAttributes),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub title: String,
    pub action: MenuAction,
}

impl MenuEntry {
    /// Runs the entry's action.
    pub fn open_editor(&self, canvas_box: CanvasBox, settings: EditorSettings) -> EditorSession {
        match &self.action {
            MenuAction::EditImageMap(image) => {
                EditorSession::open(image.clone(), canvas_box, settings)
            }
        }
    }
}

/// Menu entries for a right-click on an element with tag `tag_name`.
///
/// Only images get an entry.
pub fn image_context_menu(tag_name: &str, attrs: &ImageAttributes) -> Option<MenuEntry> {
    if !tag_name.eq_ignore_ascii_case("img") {
        return None;
    }
    Some(MenuEntry {
        title: EDIT_IMAGE_MAP_TITLE.to_string(),
        action: MenuAction::EditImageMap(attrs.clone()),
    })
}

//! Editor session: owns the project and turns commands and pointer events
//! into model changes

use super::collab::*;
use super::commands::{EditorCommand, PhotoPanel, TextPanel, WizardKind};
use super::interaction::{ElementKind, InteractionState, ReleaseOutcome, Selection};
use crate::constants::DEFAULT_BACKGROUND;
use crate::export::{export_images, export_pdf};
use crate::io::{load_project, save_project};
use crate::model::{PhotoKey, Project, TextBox};
use crate::options::PhotobookConfig;
use crate::render::RenderContext;
use crate::render::canvas::{CanvasLayout, draw_page};
use crate::types::{Background, ExportFormat, FitMode, FrameSource, PageSize, parse_hex_color};
use crate::wizard::{SmartWizardOptions, run_basic_wizard, run_smart_wizard};
use crate::{PhotobookError, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

/// Top-level screen of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    MainMenu,
    Editor,
}

pub struct EditorSession {
    screen: Screen,
    project: Project,
    project_path: Option<PathBuf>,
    config: PhotobookConfig,
    ctx: RenderContext,
    interaction: InteractionState,
    layout: CanvasLayout,
    rng: StdRng,
}

impl EditorSession {
    pub fn new(config: PhotobookConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Session whose wizard runs are reproducible
    pub fn with_seed(config: PhotobookConfig, seed: u64) -> Self {
        Self {
            screen: Screen::MainMenu,
            project: Project::default(),
            project_path: None,
            ctx: RenderContext::from_config(&config),
            config,
            interaction: InteractionState::Idle,
            layout: CanvasLayout::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    /// Boxes of the last redraw
    pub fn layout(&self) -> &CanvasLayout {
        &self.layout
    }

    pub fn selection(&self) -> Option<Selection> {
        self.interaction.selection()
    }

    /// Key of the selected photo slot
    pub fn selected_photo(&self) -> Result<PhotoKey> {
        match self.selection() {
            Some(Selection {
                kind: ElementKind::Photo,
                index,
            }) => Ok(PhotoKey::new(self.project.current_page, index)),
            _ => Err(PhotobookError::NoSelection),
        }
    }

    /// Photo tool values for the selected slot
    pub fn photo_panel(&self) -> Option<PhotoPanel> {
        let key = self.selected_photo().ok()?;
        self.project.slot(key).ok().map(PhotoPanel::from_slot)
    }

    /// Text tool values for the selected text box
    pub fn text_panel(&self) -> Option<TextPanel> {
        match self.selection()? {
            Selection {
                kind: ElementKind::Text,
                index,
            } => self
                .project
                .text(self.project.current_page, index)
                .ok()
                .map(TextPanel::from_text),
            _ => None,
        }
    }

    /// Show `project` in the editor
    pub fn open_project(&mut self, project: Project, path: Option<PathBuf>) {
        self.project = project;
        self.project.current_page = 0;
        self.project_path = path;
        self.interaction.clear();
        self.screen = Screen::Editor;
    }

    fn reset_to_main_menu(&mut self) {
        self.project = Project::default();
        self.project_path = None;
        self.interaction.clear();
        self.layout = CanvasLayout::default();
        self.screen = Screen::MainMenu;
    }

    fn selection_is_valid(&self, selection: Selection) -> bool {
        let Ok(page) = self.project.current() else {
            return false;
        };
        match selection.kind {
            ElementKind::Photo => selection.index < page.photos.len(),
            ElementKind::Text => selection.index < page.texts.len(),
        }
    }

    /// Redraw the current page and restore the selection highlight
    pub fn redraw(&mut self, surface: &mut dyn CanvasSurface) {
        let page = match (self.screen, self.project.current()) {
            (Screen::Editor, Ok(page)) => page,
            _ => {
                surface.clear();
                self.layout = CanvasLayout::default();
                return;
            }
        };
        self.layout = draw_page(surface, page, &self.ctx);

        match self.selection() {
            Some(selection) if self.selection_is_valid(selection) => {
                let id = selection.element_id();
                surface.set_selected(id, true);
                surface.raise(id);
            }
            Some(_) => {
                self.interaction.clear();
            }
            None => {}
        }
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    /// Press at canvas position `(x, y)`
    pub fn press(&mut self, x: f32, y: f32, surface: &mut dyn CanvasSurface) {
        let hit = self
            .layout
            .text_at(x, y)
            .map(Selection::text)
            .or_else(|| self.layout.photo_at(x, y).map(Selection::photo))
            .and_then(|selection| {
                self.layout
                    .rect_of(selection.element_id())
                    .map(|rect| (selection, rect))
            });

        if let Some(previous) = self.interaction.press(hit, x, y) {
            surface.set_selected(previous.element_id(), false);
        }
        if let Some((selection, _)) = hit {
            let id = selection.element_id();
            surface.set_selected(id, true);
            surface.raise(id);
            log::debug!("Selected {:?}", selection);
        }
    }

    /// Pointer moved with the button held
    pub fn drag(&mut self, x: f32, y: f32, surface: &mut dyn CanvasSurface) {
        if let Some((selection, dx, dy)) = self.interaction.drag(x, y) {
            surface.move_element(selection.element_id(), dx, dy);
        }
    }

    /// Button released; commits a move or a swap
    pub fn release(&mut self, x: f32, y: f32, surface: &mut dyn CanvasSurface) -> Result<()> {
        let page = self.project.current_page;
        match self.interaction.release(x, y, &self.layout) {
            ReleaseOutcome::Ignored | ReleaseOutcome::Clicked(_) => return Ok(()),
            ReleaseOutcome::Moved {
                selection,
                relx,
                rely,
            } => match selection.kind {
                ElementKind::Photo => self
                    .project
                    .move_slot(PhotoKey::new(page, selection.index), relx, rely)?,
                ElementKind::Text => self.project.move_text(page, selection.index, relx, rely)?,
            },
            ReleaseOutcome::Swapped { source, target } => {
                self.project.swap_photos(page, source, target)?;
                log::debug!("Swapped photos {} and {} on page {}", source, target, page);
                self.interaction = InteractionState::Selected(Selection::photo(target));
            }
        }
        self.redraw(surface);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Run a command, report failures through the dialogs, then redraw.
    ///
    /// Rejected commands leave the project as it was.
    pub async fn dispatch(&mut self, command: EditorCommand, collab: &mut Collaborators<'_>) -> Result<()> {
        log::debug!("Editor command: {:?}", command);
        let result = self.execute(command, collab).await;
        if let Err(e) = &result {
            log::warn!("Editor command failed: {}", e);
            collab.dialogs.warn(&e.to_string());
        }
        self.redraw(collab.surface);
        result
    }

    fn page_size_for_new_page(&self) -> PageSize {
        self.project
            .current()
            .map(|page| page.size)
            .unwrap_or(self.config.default_page_size)
    }

    async fn execute(&mut self, command: EditorCommand, collab: &mut Collaborators<'_>) -> Result<()> {
        match command {
            EditorCommand::NewProject { slots, size } => {
                size.validate()?;
                self.open_project(Project::new(slots, size), None);
            }
            EditorCommand::SelectPage(index) => {
                self.project.select_page(index)?;
                self.interaction.clear();
            }
            EditorCommand::AddPage { slots } => {
                let size = self.page_size_for_new_page();
                self.project.add_page(slots, size);
                self.interaction.clear();
            }
            EditorCommand::DeletePage(index) => {
                self.project.page(index)?;
                if self.project.page_count() <= 1 {
                    return Err(PhotobookError::LastPage);
                }
                if collab
                    .dialogs
                    .confirm(&format!("Delete page {}?", index + 1))
                {
                    self.project.delete_page(index)?;
                    self.interaction.clear();
                }
            }
            EditorCommand::RegenerateLayout { page, slots } => {
                let dialogs = &mut *collab.dialogs;
                let applied = self.project.regenerate_layout(page, slots, |lost| {
                    dialogs.confirm(&format!(
                        "The new layout has fewer slots; {} photo(s) will be removed. Continue?",
                        lost
                    ))
                })?;
                if applied {
                    self.interaction.clear();
                }
            }
            EditorCommand::SetPageSize { page, size } => self.project.set_page_size(page, size)?,

            EditorCommand::AddPhotoSlot { page } => {
                self.project.add_photo_slot(page)?;
            }
            EditorCommand::DeletePhotoSlot(key) => {
                self.project.delete_photo_slot(key)?;
                self.interaction.clear();
            }
            EditorCommand::AddPhotoToSlot(key) => {
                self.project.slot(key)?;
                if let Some(path) = collab.dialogs.pick_file("Choose a photo", &[IMAGE_FILES]) {
                    self.project.set_photo_path(key, Some(path))?;
                }
            }
            EditorCommand::SetPhotoPath { key, path } => self.project.set_photo_path(key, path)?,
            EditorCommand::UpdatePhoto { key, panel } => {
                let slot = self.project.slot(key)?;
                let resized = slot.relwidth != panel.relwidth || slot.relheight != panel.relheight;
                panel.apply_to(self.project.properties_mut(key)?);
                if resized {
                    self.project
                        .resize_slot_master(key, panel.relwidth, panel.relheight)?;
                }
            }
            EditorCommand::ResizeSlot {
                key,
                relwidth,
                relheight,
            } => self.project.resize_slot(key, relwidth, relheight)?,
            EditorCommand::SetFitMode { key, mode } => {
                let image_size = match (mode, self.project.slot(key)?.path()) {
                    (FitMode::Fit, Some(path)) => image::image_dimensions(path)?,
                    (FitMode::Fit, None) => {
                        return Err(PhotobookError::InvalidInput(
                            "Fit mode needs a photo in the slot".to_string(),
                        ));
                    }
                    (FitMode::Fill, _) => (0, 0),
                };
                self.project.apply_fit_mode(key, mode, image_size)?;
            }
            EditorCommand::Reorder { key, direction } => self.project.reorder(key, direction)?,
            EditorCommand::SwapPhotos {
                page,
                first,
                second,
            } => self.project.swap_photos(page, first, second)?,
            EditorCommand::SetPhotoFrame { key, frame } => {
                self.project.properties_mut(key)?.frame_path = frame;
            }
            EditorCommand::ChoosePhotoFrame(key) => {
                self.project.slot(key)?;
                if let Some(path) = collab.dialogs.pick_file("Choose a frame", &[FRAME_FILES]) {
                    self.project.properties_mut(key)?.frame_path = Some(FrameSource::Custom(path));
                }
            }

            EditorCommand::SetBackground { page, background } => {
                self.project.set_background(page, background)?
            }
            EditorCommand::ChooseBackgroundColor { page } => {
                let initial = match &self.project.page(page)?.background {
                    Some(Background::Color(hex)) => hex.clone(),
                    _ => DEFAULT_BACKGROUND.to_string(),
                };
                if let Some(hex) = collab.dialogs.pick_color(&initial) {
                    self.project.set_background(page, Some(Background::Color(hex)))?;
                }
            }
            EditorCommand::ChooseBackgroundImage { page } => {
                self.project.page(page)?;
                if let Some(path) = collab
                    .dialogs
                    .pick_file("Choose a background image", &[IMAGE_FILES])
                {
                    self.project
                        .set_background(page, Some(Background::Image { path }))?;
                }
            }
            EditorCommand::SetPageFrame { page, frame } => self.project.set_page_frame(page, frame)?,
            EditorCommand::ChoosePageFrame { page } => {
                self.project.page(page)?;
                if let Some(path) = collab.dialogs.pick_file("Choose a page frame", &[FRAME_FILES]) {
                    self.project
                        .set_page_frame(page, Some(FrameSource::Custom(path)))?;
                }
            }
            EditorCommand::SetPageFrameThickness { page, thickness } => {
                self.project.page_mut(page)?.page_frame_thickness = thickness.clamp(0.0, 0.5);
            }

            EditorCommand::AddText { page } => {
                let index = self.project.add_text_box(page, TextBox::default())?;
                if page == self.project.current_page {
                    self.interaction = InteractionState::Selected(Selection::text(index));
                }
            }
            EditorCommand::DeleteText { page, index } => {
                self.project.delete_text_box(page, index)?;
                self.interaction.clear();
            }
            EditorCommand::UpdateText { page, index, panel } => {
                parse_hex_color(&panel.font_color)?;
                panel.apply_to(self.project.text_mut(page, index)?);
            }
            EditorCommand::ChooseTextColor { page, index } => {
                let initial = self.project.text(page, index)?.font_color.clone();
                if let Some(hex) = collab.dialogs.pick_color(&initial) {
                    self.project.set_text_color(page, index, &hex)?;
                }
            }

            EditorCommand::Save => match self.project_path.clone() {
                Some(path) => self.save_to(&path, collab).await?,
                None => self.save_as(collab).await?,
            },
            EditorCommand::SaveAs => self.save_as(collab).await?,
            EditorCommand::Open => self.open(collab).await?,
            EditorCommand::Export { format } => self.export(format, collab).await?,
            EditorCommand::RunWizard(kind) => self.run_wizard(kind, collab)?,
        }
        Ok(())
    }

    async fn save_to(&mut self, path: &Path, collab: &mut Collaborators<'_>) -> Result<()> {
        if self.project.pages.is_empty() {
            return Err(PhotobookError::InvalidInput(
                "Nothing to save; create at least one page".to_string(),
            ));
        }
        save_project(&self.project, path).await?;
        self.project_path = Some(path.to_path_buf());
        collab
            .dialogs
            .notify(&format!("Project saved to {}", path.display()));
        Ok(())
    }

    async fn save_as(&mut self, collab: &mut Collaborators<'_>) -> Result<()> {
        match collab.dialogs.pick_save_path("Save project", "lolaba") {
            Some(path) => self.save_to(&path, collab).await,
            None => Ok(()),
        }
    }

    async fn open(&mut self, collab: &mut Collaborators<'_>) -> Result<()> {
        let Some(path) = collab.dialogs.pick_file("Open project", &[PROJECT_FILES]) else {
            return Ok(());
        };
        match load_project(&path).await {
            Ok(project) if project.pages.is_empty() => {
                self.reset_to_main_menu();
                Err(PhotobookError::InvalidInput(
                    "The project file is empty or damaged".to_string(),
                ))
            }
            Ok(project) => {
                self.open_project(project, Some(path));
                collab.dialogs.notify("Project loaded");
                Ok(())
            }
            Err(e) => {
                self.reset_to_main_menu();
                Err(e)
            }
        }
    }

    async fn export(&mut self, format: ExportFormat, collab: &mut Collaborators<'_>) -> Result<()> {
        if self.project.pages.is_empty() {
            return Err(PhotobookError::InvalidInput(
                "Nothing to export; create at least one page".to_string(),
            ));
        }
        let message = match format {
            ExportFormat::Pdf => {
                let Some(path) = collab.dialogs.pick_save_path("Export PDF", "pdf") else {
                    return Ok(());
                };
                {
                    let _busy = BusyGuard::new(&mut *collab.busy);
                    export_pdf(&self.project, &path, &self.ctx).await?;
                }
                format!("PDF created: {}", path.display())
            }
            ExportFormat::Png | ExportFormat::Jpeg => {
                let Some(dir) = collab.dialogs.pick_directory("Export pages to folder") else {
                    return Ok(());
                };
                let base = dir.join(format!("page.{}", format.extension()));
                let written = {
                    let _busy = BusyGuard::new(&mut *collab.busy);
                    export_images(
                        &self.project,
                        &base,
                        format,
                        self.config.export.jpeg_quality,
                        &self.ctx,
                    )
                    .await?
                };
                format!("{} page(s) exported to {}", written.len(), dir.display())
            }
        };
        collab.dialogs.notify(&message);
        Ok(())
    }

    fn run_wizard(&mut self, kind: WizardKind, collab: &mut Collaborators<'_>) -> Result<()> {
        let Some(dir) = collab.dialogs.pick_directory("Choose a photo folder") else {
            return Ok(());
        };
        let page_size = self.config.default_page_size;
        let (project, report) = {
            let _busy = BusyGuard::new(&mut *collab.busy);
            match kind {
                WizardKind::Basic => run_basic_wizard(&dir, page_size, &mut self.rng)?,
                WizardKind::Smart {
                    theme,
                    group_by_folder,
                } => {
                    let options = SmartWizardOptions {
                        theme,
                        group_by_folder,
                        page_size,
                        ..SmartWizardOptions::default()
                    };
                    run_smart_wizard(&dir, &options, &mut self.rng)?
                }
            }
        };
        self.open_project(project, None);
        collab.dialogs.notify(&report.summary());
        Ok(())
    }
}

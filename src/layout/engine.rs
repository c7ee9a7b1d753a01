//! Board composition core.

use crate::clock::Clock;
use crate::config::{BoardConfig, ConfigError};
use crate::grid::{GridError, build_grid};
use crate::merge::merge_gaps;
use crate::model::{BoardOverlays, Event, Resource};
use crate::window::ViewWindow;

use super::board::{build_gutter, filter_resources, group_by_resource, now_marker};
use super::column::render_column;
use super::types::BoardLayout;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid board config: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid appointment on {resource}: {source}")]
    Grid {
        resource: String,
        #[source]
        source: GridError,
    },
}

/// Composes boards for one configuration.
#[derive(Debug, Clone, Default)]
pub struct BoardEngine {
    pub(crate) config: BoardConfig,
}

impl BoardEngine {
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Compute the layout of one day board.
    ///
    /// Events whose resource is not on the board are counted but never drawn.
    pub fn compose(
        &self,
        resources: &[Resource],
        events: &[Event],
        overlays: &BoardOverlays,
        window: &ViewWindow,
        clock: &dyn Clock,
    ) -> Result<BoardLayout, BoardError> {
        let config = &self.config;

        // Phase 1: Column selection
        let shown = filter_resources(resources, window.selected_resource.as_deref());
        let groups = group_by_resource(events);

        // Phase 2: Grid, merge and cells per column
        let mut columns = Vec::with_capacity(shown.len());
        for resource in shown {
            let resource_events = groups
                .get(resource.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            let grid = build_grid(resource_events, config.total_slots).map_err(|source| {
                BoardError::Grid {
                    resource: resource.id.clone(),
                    source,
                }
            })?;
            let blocks = merge_gaps(&grid, config.overlay_start_threshold);
            let column_overlays = overlays.for_resource(&resource.id);

            columns.push(render_column(
                resource,
                &grid,
                &blocks,
                &column_overlays,
                config.cell_height_px,
            ));
        }

        // Phase 3: Shared gutter and current time
        let gutter = build_gutter(config);
        let now_marker = now_marker(config, window.date, clock.now());
        let total_events = events.len();

        let orphans = events
            .iter()
            .filter(|e| !resources.iter().any(|r| r.id == e.resource_id))
            .count();
        if orphans > 0 {
            tracing::warn!(orphans, "appointments reference unknown resources");
        }

        tracing::debug!(
            date = %window.date,
            columns = columns.len(),
            total_events,
            now_marker = now_marker.is_some(),
            "composed board"
        );

        Ok(BoardLayout {
            date: window.date,
            granularity: window.granularity,
            columns,
            gutter,
            now_marker,
            total_events,
            cell_height_px: config.cell_height_px,
            height_px: config.board_height_px(),
        })
    }
}

/// Compose a board with a validated `config`.
pub fn compose_board(
    resources: &[Resource],
    events: &[Event],
    overlays: &BoardOverlays,
    window: &ViewWindow,
    config: &BoardConfig,
    clock: &dyn Clock,
) -> Result<BoardLayout, BoardError> {
    BoardEngine::new(*config)?.compose(resources, events, overlays, window, clock)
}

use std::iter;

use gestris_engine::{GameSession, PieceSeed, PieceSource, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, BlockExt as _, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, color, style};

const STATS_WIDTH: u16 = 20;

/// Board plus a side panel with the session state and counters.
///
/// After game over the board is covered by a "Game Over!" banner.
#[derive(Debug)]
pub struct SessionDisplay<'a, S> {
    session: &'a GameSession<S>,
    seed: Option<PieceSeed>,
}

impl<'a, S> SessionDisplay<'a, S>
where
    S: PieceSource,
{
    pub fn new(session: &'a GameSession<S>) -> Self {
        Self {
            session,
            seed: None,
        }
    }

    pub fn seed(self, seed: PieceSeed) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    fn stat_rows(&self) -> Vec<(&'static str, String)> {
        let session = self.session;
        let stats = session.stats();
        let state = match session.state() {
            SessionState::Playing => "playing",
            SessionState::GameOver => "game over",
        };
        let mut rows = vec![
            ("STATE:", state.to_owned()),
            ("FRAMES:", stats.frames().to_string()),
            ("MERGED:", stats.merged_pieces().to_string()),
            ("REJECTED:", stats.rejected_transforms().to_string()),
            ("GESTURE:", session.last_gesture().to_string()),
        ];
        if let Some(seed) = self.seed {
            // Full seed does not fit the panel; the prefix is enough to tell
            // games apart.
            rows.push(("SEED:", seed.to_string()[..8].to_owned()));
        }
        rows
    }
}

impl<S> Widget for SessionDisplay<'_, S>
where
    S: PieceSource,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl<S> Widget for &SessionDisplay<'_, S>
where
    S: PieceSource,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match self.session.state() {
            SessionState::Playing => color::WHITE,
            SessionState::GameOver => color::RED,
        };

        let game_board = BoardDisplay::new(self.session.board())
            .active_piece(*self.session.active_piece())
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );

        let rows = self.stat_rows();
        let stats_block = Block::bordered()
            .title(Line::from("STATS").centered())
            .padding(Padding::horizontal(1))
            .border_style(border_style)
            .style(style::DEFAULT);
        let stats_width = STATS_WIDTH + super::block_horizontal_margin(Some(&stats_block));
        let stats_height = u16::try_from(rows.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(Some(&stats_block));

        let [board_column, stats_column] = Layout::horizontal([
            Constraint::Length(game_board.width()),
            Constraint::Length(stats_width),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(board_column);
        let [stats_area] = Layout::vertical([Constraint::Length(stats_height)]).areas(stats_column);

        let board_width = game_board.width();
        game_board.render(board_area, buf);

        let stats_block = Some(stats_block);
        stats_block.as_ref().render(stats_area, buf);
        let inner = stats_block.inner_if_some(stats_area);
        let row_areas = Layout::vertical(rows.iter().map(|_| Constraint::Length(1))).split(inner);
        for ((label, value), row_area) in iter::zip(rows, row_areas.iter().copied()) {
            let [label_area, value_area] = row_area.layout(&Layout::horizontal([
                Constraint::Length(10),
                Constraint::Fill(1),
            ]));
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value, style::DEFAULT)
                .right_aligned()
                .render(value_area, buf);
        }

        if self.session.state().is_game_over() {
            let block = Block::new().style(style::GAME_OVER);
            let text = Text::styled("Game Over!", style::GAME_OVER).centered();
            let banner = board_area.centered(
                Constraint::Length(board_width),
                Constraint::Length(3),
            );
            let inner = block.inner(banner);
            Clear.render(banner, buf);
            block.render(banner, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

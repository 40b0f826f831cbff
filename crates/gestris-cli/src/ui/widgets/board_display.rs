use std::iter;

use gestris_engine::{Board, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::CellDisplay;

/// Settled cells with the active piece drawn on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    active_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            active_piece: None,
            block: None,
        }
    }

    pub fn active_piece(self, piece: Piece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        Board::WIDTH as u16 * CellDisplay::WIDTH
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        Board::HEIGHT as u16 * CellDisplay::HEIGHT
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        // Cells of a topped-out piece may overlap settled ones; the piece wins.
        let mut board = self.board.clone();
        if let Some(piece) = &self.active_piece {
            board.fill_piece(piece);
        }

        let col_constraints = (0..Board::WIDTH).map(|_| Constraint::Length(CellDisplay::WIDTH));
        let row_constraints = (0..Board::HEIGHT).map(|_| Constraint::Length(CellDisplay::HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Board::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Board::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, board.rows()) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                CellDisplay::from_cell(*cell).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use gestris_engine::{PieceColor, PiecePosition, ShapeKind};

    use super::*;
    use crate::ui::widgets::style;

    fn render(widget: &BoardDisplay<'_>) -> Buffer {
        let area = Rect::new(0, 0, widget.width(), widget.height());
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf
    }

    #[test]
    fn test_size_includes_border() {
        let board = Board::EMPTY;
        assert_eq!(BoardDisplay::new(&board).width(), 20);
        assert_eq!(BoardDisplay::new(&board).height(), 20);

        let bordered = BoardDisplay::new(&board).block(BlockWidget::bordered());
        assert_eq!(bordered.width(), 22);
        assert_eq!(bordered.height(), 22);
    }

    #[test]
    fn test_active_piece_overlay() {
        let mut board = Board::EMPTY;
        board.set_cell(0, 19, PieceColor::Green).unwrap();
        let piece = Piece::new(ShapeKind::O, PieceColor::Red)
            .with_position(PiecePosition::new(4, 0));

        let buf = render(&BoardDisplay::new(&board).active_piece(piece));

        let red = style::piece(PieceColor::Red).bg;
        let green = style::piece(PieceColor::Green).bg;
        assert_eq!(buf[(8, 0)].bg, red.unwrap());
        assert_eq!(buf[(9, 1)].bg, red.unwrap());
        assert_eq!(buf[(0, 19)].bg, green.unwrap());
        assert_eq!(buf[(2, 0)].symbol(), ".");
        // The board itself is untouched.
        assert_eq!(board.occupied_count(), 1);
    }
}

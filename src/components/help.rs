use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Padding, Row, Table, Widget},
};

use crate::config::{key_event_to_string, PageKeyBindings};

#[derive(Debug)]
pub struct Help {
    keybinding_groups: Vec<(String, Vec<(String, String)>)>,
    column_spacing: u16,
    margin_vertical: u16,
    margin_horizontal: u16,
}

impl Help {
    pub fn new(keybinding_groups: Vec<(String, &PageKeyBindings)>) -> Self {
        let groups = keybinding_groups
            .into_iter()
            .map(|(group_name, keybindings)| {
                let mut keybindings: Vec<(String, String)> =
                    keybindings.iter().map(|(event, action)| (key_event_to_string(event), action.name())).collect();
                keybindings.sort();
                (group_name, keybindings)
            })
            .collect();

        Self { keybinding_groups: groups, column_spacing: 5, margin_vertical: 1, margin_horizontal: 2 }
    }

    fn render_group(
        &self,
        area: Rect,
        buf: &mut Buffer,
        group_name: &str,
        keybindings: &[(String, String)],
        key_length: u16,
        val_length: u16,
    ) {
        let rows: Vec<Row> = keybindings.iter().map(|(key, val)| Row::new(vec![key.clone(), val.clone()])).collect();
        let widths = [Constraint::Length(key_length), Constraint::Min(val_length)];

        let table = Table::new(rows, widths)
            .column_spacing(self.column_spacing)
            .header(Row::new(vec!["Key", "Action"]).style(Style::new().bold()).bottom_margin(1))
            .block(
                Block::new()
                    .title(group_name.to_string())
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::new().bold().fg(Color::Cyan))
                    .padding(Padding::symmetric(self.margin_horizontal, self.margin_vertical)),
            );

        Clear.render(area, buf);
        table.render(area, buf);
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_length = self
            .keybinding_groups
            .iter()
            .flat_map(|(_, bindings)| bindings.iter().map(|(key, _)| key.len()))
            .max()
            .unwrap_or(0) as u16;
        let val_length = self
            .keybinding_groups
            .iter()
            .flat_map(|(_, bindings)| bindings.iter().map(|(_, val)| val.len()))
            .max()
            .unwrap_or(0) as u16;

        // + column_spacing + margin*2 + border
        let width = key_length + val_length + self.column_spacing + (self.margin_horizontal * 2) + 2;
        // + margin*2 + header + border
        let heights: Vec<Constraint> = self
            .keybinding_groups
            .iter()
            .map(|(_, bindings)| Constraint::Length(bindings.len() as u16 + (self.margin_vertical * 2) + 2 + 2))
            .collect();

        let area = Layout::default()
            .flex(Flex::Center)
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(width)])
            .split(area)[0];

        let areas = Layout::default().flex(Flex::Center).direction(Direction::Vertical).constraints(heights).split(area);

        for ((group_name, keybindings), area) in self.keybinding_groups.iter().zip(areas.iter()) {
            self.render_group(*area, buf, group_name, keybindings, key_length, val_length);
        }
    }
}

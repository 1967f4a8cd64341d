//! # InfoPanel Component
//!
//! Static help text shown in place of the conversation when the `?`
//! button (or F1) is toggled. Scrolls when the window is too short.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;

fn bold(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

fn bullet(text: &str) -> Line<'_> {
    Line::from(vec![Span::styled("  • ", Style::default().fg(Color::Cyan)), Span::raw(text)])
}

/// The help text, one `Line` per paragraph or list item.
pub fn help_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            bold("Salut!"),
            Span::raw(" Eu sunt asistentul tău virtual de la "),
            bold("Centrul de Consiliere și Orientare în Carieră (CCOC)"),
            Span::raw(" și sunt aici să te îndrum pas cu pas prin toate informațiile utile!"),
        ]),
        Line::default(),
        Line::raw("Te pot ajuta să navighezi printre serviciile pe care CCOC ți le pune la dispoziție:"),
        bullet("Consilierea în carieră"),
        bullet("Consilierea psihologică"),
        bullet("Programul de voluntariat al CCOC"),
        Line::default(),
        Line::from(vec![
            Span::raw("Scopul meu e să-ți "),
            bold("facilitez accesul"),
            Span::raw(
                " la toate aceste resurse. Nu te sfii să mă întrebi despre programări, cât costă (spoiler: ",
            ),
            bold("sunt gratis!"),
            Span::raw(
                "), unde ne găsești, ce beneficii ai, dacă ești eligibil sau orice altceva legat de aceste servicii.",
            ),
        ]),
        Line::default(),
        Line::from(vec![
            bold("Important:"),
            Span::raw(
                " Eu răspund la fiecare întrebare individual, așa că nu rețin contextul conversației. Ca să mă folosești la maximum, pune-mi întrebări clare, de genul:",
            ),
        ]),
        bullet("Ce servicii oferă CCOC?"),
        bullet("Cum mă programez la consiliere psihologică?"),
        bullet("Cât costă consilierea în carieră?"),
        Line::default(),
        Line::from(vec![
            Span::raw("Sunt aici pentru a-ți oferi "),
            bold("răspunsuri clare, pe înțelesul tău"),
            Span::raw(
                ", și pentru a te ghida astfel încât să beneficiezi din plin de tot suportul oferit de CCOC. ",
            ),
            bold("Abia aștept să te ajut!"),
        ]),
    ]
}

/// Rows the help text occupies when wrapped to `width`.
pub fn content_height(width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    help_lines()
        .iter()
        .map(|line| {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            textwrap::wrap(&text, width as usize).len().max(1) as u16
        })
        .sum()
}

pub struct InfoPanel {
    /// First visible row of the wrapped text.
    pub scroll: u16,
}

impl InfoPanel {
    pub fn new(scroll: u16) -> Self {
        Self { scroll }
    }
}

impl Component for InfoPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(help_lines())
            .wrap(Wrap { trim: true })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_help_mentions_services() {
        let text: String = help_lines()
            .iter()
            .flat_map(|line| line.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("Consilierea psihologică"));
        assert!(text.contains("sunt gratis!"));
    }

    #[test]
    fn test_content_height_grows_when_narrow() {
        let wide = content_height(200);
        let narrow = content_height(30);
        assert!(wide >= help_lines().len() as u16);
        assert!(narrow > wide);
        assert_eq!(content_height(0), 0);
    }

    #[test]
    fn test_render_starts_with_greeting() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| InfoPanel::new(0).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.starts_with("Salut!"));
    }
}

//! # TUI Components
//!
//! All UI components for the terminal interface. Every component is
//! stateless: it is created fresh each frame with the data it needs as
//! props and rendered through the [`Component`](crate::tui::component::Component)
//! trait.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Top status bar)
//! ├── category_panel.rs  (One box of card type buttons)
//! └── card_view.rs       (The drawn card)
//! ```

mod card_view;
mod category_panel;
mod title_bar;

pub use card_view::CardView;
pub use category_panel::CategoryPanel;
pub use title_bar::TitleBar;

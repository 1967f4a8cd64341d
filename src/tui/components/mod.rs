//! # TUI Components
//!
//! All UI components for the chat widget.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `Launcher`: The closed-state toggle button
//! - `Header`: Window title with info and close buttons
//! - `Bubble`: A single conversation turn with its quick replies
//! - `InfoPanel`: Static help text (scroll offset is a prop)
//!
//! ### Stateful Components
//!
//! Components that keep presentation state between frames:
//! - `InputBox`: Cursor over the draft held in `App`
//! - `MessageList`: Scrollable conversation with click targets
//!
//! Components receive external data as props instead of reading `App`
//! directly, so each can be rendered in isolation against a `TestBackend`.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── launcher.rs      (Toggle button)
//! ├── header.rs        (Window title row)
//! ├── message.rs       (Single turn bubble)
//! ├── message_list.rs  (Scrollable conversation)
//! ├── info_panel.rs    (Help text)
//! └── input_box/       (Draft editor)
//! ```

pub mod header;
pub mod info_panel;
pub mod input_box;
pub mod launcher;
pub mod message;
pub mod message_list;

pub use header::Header;
pub use info_panel::InfoPanel;
pub use input_box::{InputBox, InputEvent};
pub use launcher::Launcher;
pub use message_list::{MessageList, MessageListState};

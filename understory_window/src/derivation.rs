// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Token and title derivation for dependent windows.
//!
//! Before an attribute record is handed to the windowing substrate, the owning
//! window fills in the identity token and title the client left empty. What it
//! fills in depends on the record's [`WindowClass`]:
//!
//! | Class | Token, when absent | Title, when empty |
//! |-------|--------------------|-------------------|
//! | Sub-window | token of the owner's decor surface | mnemonic or type, then `:app` |
//! | System window | never derived | `Sys` + type, then `:app` |
//! | Application | container's app token, else own app token | unchanged |
//!
//! System windows deliberately do not take the owner's token: their lifecycle
//! is independent of the application that requested them.
//!
//! A non-empty title is never replaced, and the function is idempotent:
//! running it again over its own output changes nothing.
//!
//! ```rust
//! use understory_window::{
//!     AttributeRecord, DerivationContext, Token, WindowClass, WindowType, adjust_for_sub_window,
//! };
//!
//! let cx = DerivationContext {
//!     app_name: "demo",
//!     app_token: Some(Token::new(7)),
//!     container: None,
//!     decor_token: Some(Token::new(99)),
//! };
//!
//! let mut panel = AttributeRecord::with_type(WindowType::APPLICATION_SUB_PANEL);
//! assert_eq!(adjust_for_sub_window(&cx, &mut panel), WindowClass::SubWindow);
//! assert_eq!(panel.title, "SubPanel:demo");
//! assert_eq!(panel.token, Some(Token::new(99)));
//! ```

use alloc::string::{String, ToString};

use crate::attributes::AttributeRecord;
use crate::types::{Token, WindowClass};

/// Identity of the container a window is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContainerIdentity {
    /// The container's application token.
    pub app_token: Option<Token>,
}

/// Everything derivation needs to know about the owning window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DerivationContext<'a> {
    /// Application name; appended to synthesized titles when non-empty.
    pub app_name: &'a str,
    /// The owning window's application token.
    pub app_token: Option<Token>,
    /// The owning window's container, if it has one.
    pub container: Option<ContainerIdentity>,
    /// Token of the owning window's decor surface, if one exists yet.
    pub decor_token: Option<Token>,
}

/// Fills in the missing token and title of `attrs`.
///
/// Returns the class the record's type fell into.
pub fn adjust_for_sub_window(
    cx: &DerivationContext<'_>,
    attrs: &mut AttributeRecord,
) -> WindowClass {
    let class = attrs.window_type.class();
    match class {
        WindowClass::SubWindow => {
            if attrs.token.is_none() {
                attrs.token = cx.decor_token;
            }
            if !attrs.has_title() {
                match attrs.window_type.sub_window_mnemonic() {
                    Some(mnemonic) => attrs.title.push_str(mnemonic),
                    None => push_display(&mut attrs.title, attrs.window_type.get()),
                }
                append_app_name(&mut attrs.title, cx.app_name);
            }
        }
        WindowClass::SystemWindow => {
            if !attrs.has_title() {
                attrs.title.push_str("Sys");
                push_display(&mut attrs.title, attrs.window_type.get());
                append_app_name(&mut attrs.title, cx.app_name);
            }
        }
        WindowClass::Application => {
            if attrs.token.is_none() {
                attrs.token = match cx.container {
                    Some(container) => container.app_token,
                    None => cx.app_token,
                };
            }
        }
    }
    log::trace!(
        "derived {class:?} attributes: type {}, token {:?}, title {:?}",
        attrs.window_type,
        attrs.token,
        attrs.title
    );
    class
}

fn append_app_name(title: &mut String, app_name: &str) {
    if !app_name.is_empty() {
        title.push(':');
        title.push_str(app_name);
    }
}

fn push_display(title: &mut String, value: i32) {
    title.push_str(&value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WindowType;

    fn cx(app_name: &str) -> DerivationContext<'_> {
        DerivationContext {
            app_name,
            app_token: Some(Token::new(42)),
            container: None,
            decor_token: Some(Token::new(500)),
        }
    }

    #[test]
    fn sub_window_mnemonics() {
        let cases = [
            (WindowType::APPLICATION_MEDIA, "Media"),
            (WindowType::APPLICATION_MEDIA_OVERLAY, "MediaOvr"),
            (WindowType::APPLICATION_PANEL, "Panel"),
            (WindowType::APPLICATION_SUB_PANEL, "SubPanel"),
            (WindowType::APPLICATION_ABOVE_SUB_PANEL, "AboveSubPanel"),
            (WindowType::APPLICATION_ATTACHED_DIALOG, "AtchDlg"),
        ];
        for (ty, mnemonic) in cases {
            let mut attrs = AttributeRecord::with_type(ty);
            adjust_for_sub_window(&cx(""), &mut attrs);
            assert_eq!(attrs.title, mnemonic);
        }
    }

    #[test]
    fn unknown_sub_window_type_uses_decimal_value() {
        let mut attrs = AttributeRecord::with_type(WindowType(1234));
        adjust_for_sub_window(&cx(""), &mut attrs);
        assert_eq!(attrs.title, "1234");

        let mut attrs = AttributeRecord::with_type(WindowType(1234));
        adjust_for_sub_window(&cx("app"), &mut attrs);
        assert_eq!(attrs.title, "1234:app");
    }

    #[test]
    fn sub_window_takes_decor_token_when_absent() {
        let mut attrs = AttributeRecord::with_type(WindowType::APPLICATION_PANEL);
        adjust_for_sub_window(&cx("x"), &mut attrs);
        assert_eq!(attrs.token, Some(Token::new(500)));

        let mut attrs = AttributeRecord::with_type(WindowType::APPLICATION_PANEL);
        attrs.token = Some(Token::new(1));
        adjust_for_sub_window(&cx("x"), &mut attrs);
        assert_eq!(attrs.token, Some(Token::new(1)));
    }

    #[test]
    fn sub_window_without_decor_leaves_token_unset() {
        let no_decor = DerivationContext {
            decor_token: None,
            ..cx("x")
        };
        let mut attrs = AttributeRecord::with_type(WindowType::APPLICATION_MEDIA);
        adjust_for_sub_window(&no_decor, &mut attrs);
        assert_eq!(attrs.token, None);
        assert_eq!(attrs.title, "Media:x");
    }

    #[test]
    fn system_window_never_takes_a_token() {
        let mut attrs = AttributeRecord::with_type(WindowType::TOAST);
        let class = adjust_for_sub_window(&cx("demo"), &mut attrs);
        assert_eq!(class, WindowClass::SystemWindow);
        assert_eq!(attrs.token, None);
        assert_eq!(attrs.title, "Sys2005:demo");

        let mut attrs = AttributeRecord::with_type(WindowType::APPLICATION_OVERLAY);
        adjust_for_sub_window(&cx(""), &mut attrs);
        assert_eq!(attrs.title, "Sys2038");
    }

    #[test]
    fn application_token_prefers_container() {
        let contained = DerivationContext {
            container: Some(ContainerIdentity {
                app_token: Some(Token::new(9)),
            }),
            ..cx("demo")
        };
        let mut attrs = AttributeRecord::default();
        assert_eq!(
            adjust_for_sub_window(&contained, &mut attrs),
            WindowClass::Application
        );
        assert_eq!(attrs.token, Some(Token::new(9)));
        assert!(attrs.title.is_empty(), "application titles are not synthesized");

        let mut attrs = AttributeRecord::default();
        adjust_for_sub_window(&cx("demo"), &mut attrs);
        assert_eq!(attrs.token, Some(Token::new(42)));
    }

    #[test]
    fn container_without_token_does_not_fall_back_to_own() {
        let contained = DerivationContext {
            container: Some(ContainerIdentity { app_token: None }),
            ..cx("demo")
        };
        let mut attrs = AttributeRecord::default();
        adjust_for_sub_window(&contained, &mut attrs);
        assert_eq!(attrs.token, None);
    }

    #[test]
    fn existing_titles_are_never_overwritten() {
        for ty in [
            WindowType::APPLICATION_PANEL,
            WindowType(1777),
            WindowType::TOAST,
            WindowType::APPLICATION,
        ] {
            let mut attrs = AttributeRecord::with_type(ty);
            attrs.title = "Mine".to_string();
            adjust_for_sub_window(&cx("demo"), &mut attrs);
            assert_eq!(attrs.title, "Mine");
        }
    }

    #[test]
    fn derivation_is_idempotent() {
        for ty in [WindowType::APPLICATION_SUB_PANEL, WindowType::TOAST, WindowType::APPLICATION] {
            let mut once = AttributeRecord::with_type(ty);
            adjust_for_sub_window(&cx("demo"), &mut once);
            let mut twice = once.clone();
            adjust_for_sub_window(&cx("demo"), &mut twice);
            assert_eq!(once, twice);
        }
    }
}

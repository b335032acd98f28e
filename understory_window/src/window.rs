// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window aggregate.
//!
//! A [`Window`] owns its features, its attribute state, its callback slot and
//! its auxiliary listeners. Hierarchy links (container, active child) are
//! stored here as [`WindowId`]s but are only changed through
//! [`WindowTree`](crate::WindowTree), which can see both ends of a link.
//!
//! Every mutation checks the destroyed flag first and fails with
//! [`WindowError::Destroyed`] once [`Window::destroy`] ran. Reads and event
//! forwarding keep working after destruction.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use kurbo::Rect;
use smallvec::SmallVec;
use spin::Once;

use crate::attributes::{
    AttributeRecord, AttributeState, LayoutSize, PixelFormat, SoftInputMode, WindowFlags,
};
use crate::callback::WindowCallback;
use crate::derivation::{ContainerIdentity, DerivationContext};
use crate::dispatch::CallbackDispatcher;
use crate::error::WindowError;
use crate::event::{MotionAction, MotionEvent};
use crate::feature::{Feature, FeatureRegistry, FeatureSet};
use crate::host::{DecorSurface, WindowManager};
use crate::id::WindowId;
use crate::listener::{
    DecorCallback, DecorCaptionShade, FrameMetrics, FrameMetricsListenerId, OnFrameMetricsAvailable,
    OnRestrictedCaptionAreaChanged, OnWindowDismissed, OnWindowSwipeDismissed, SystemBarAppearance,
    WindowControllerCallback,
};
use crate::style::{WindowContext, WindowStyle};
use crate::types::{Token, WindowType};

type FrameMetricsListeners =
    SmallVec<[(FrameMetricsListenerId, Box<dyn OnFrameMetricsAvailable>); 2]>;

/// Window policy state for one window.
///
/// ```rust
/// use std::sync::Arc;
/// use understory_window::{Feature, StaticContext, Window, WindowError};
///
/// let mut window = Window::new(Arc::new(StaticContext::default()));
/// assert_eq!(window.request_feature(Feature::ActionBar), Ok(true));
/// window.set_title("Inbox")?;
/// assert_eq!(window.attributes().title, "Inbox");
///
/// assert!(window.destroy());
/// assert_eq!(window.set_title("Outbox"), Err(WindowError::Destroyed));
/// # Ok::<(), WindowError>(())
/// ```
pub struct Window {
    context: Arc<dyn WindowContext>,
    style: Once<WindowStyle>,
    features: FeatureRegistry,
    attributes: AttributeState,

    pub(crate) container: Option<WindowId>,
    pub(crate) active_child: Option<WindowId>,
    pub(crate) is_active: bool,
    pub(crate) has_children: bool,

    app_token: Option<Token>,
    app_name: String,
    hardware_accelerated: bool,
    window_manager: Option<Box<dyn WindowManager>>,
    decor: Option<Box<dyn DecorSurface>>,

    dispatcher: CallbackDispatcher,
    on_dismissed: Option<Box<dyn OnWindowDismissed>>,
    on_swipe_dismissed: Option<Box<dyn OnWindowSwipeDismissed>>,
    controller: Option<Box<dyn WindowControllerCallback>>,
    decor_callback: Option<Box<dyn DecorCallback>>,
    caption_area_listener: Option<Box<dyn OnRestrictedCaptionAreaChanged>>,
    restricted_caption_area: Option<Rect>,
    frame_metrics_listeners: FrameMetricsListeners,
    next_frame_metrics_id: u32,

    system_bar_appearance: SystemBarAppearance,
    close_on_swipe_enabled: bool,
    overlay_with_decor_caption_enabled: bool,
    decor_caption_shade: DecorCaptionShade,
    destroyed: bool,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("features", &self.features)
            .field("attributes", &self.attributes)
            .field("container", &self.container)
            .field("active_child", &self.active_child)
            .field("is_active", &self.is_active)
            .field("has_children", &self.has_children)
            .field("app_token", &self.app_token)
            .field("app_name", &self.app_name)
            .field("has_window_manager", &self.window_manager.is_some())
            .field("has_decor", &self.decor.is_some())
            .field("has_callback", &self.dispatcher.is_set())
            .field("frame_metrics_listeners", &self.frame_metrics_listeners.len())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl Window {
    /// Creates a window whose features are seeded from
    /// [`WindowContext::default_features`].
    pub fn new(context: Arc<dyn WindowContext>) -> Self {
        let features = FeatureRegistry::new(context.default_features());
        Self {
            context,
            style: Once::new(),
            features,
            attributes: AttributeState::new(),
            container: None,
            active_child: None,
            is_active: false,
            has_children: false,
            app_token: None,
            app_name: String::new(),
            hardware_accelerated: false,
            window_manager: None,
            decor: None,
            dispatcher: CallbackDispatcher::new(),
            on_dismissed: None,
            on_swipe_dismissed: None,
            controller: None,
            decor_callback: None,
            caption_area_listener: None,
            restricted_caption_area: None,
            frame_metrics_listeners: SmallVec::new(),
            next_frame_metrics_id: 0,
            system_bar_appearance: SystemBarAppearance::empty(),
            close_on_swipe_enabled: false,
            overlay_with_decor_caption_enabled: true,
            decor_caption_shade: DecorCaptionShade::Auto,
            destroyed: false,
        }
    }

    /// Returns the context the window was created in.
    #[must_use]
    pub fn context(&self) -> &Arc<dyn WindowContext> {
        &self.context
    }

    /// Returns the theme style, resolving it on first use.
    ///
    /// The context is asked at most once per window.
    pub fn window_style(&self) -> &WindowStyle {
        self.style.call_once(|| self.context.resolve_window_style())
    }

    /// Returns `true` if the theme describes a floating window.
    pub fn is_floating(&self) -> bool {
        self.window_style().is_floating
    }

    fn ensure_alive(&self) -> Result<(), WindowError> {
        if self.destroyed {
            log::warn!("rejected change to a destroyed window");
            return Err(WindowError::Destroyed);
        }
        Ok(())
    }

    // =========================================================================
    // Features
    // =========================================================================

    /// Returns the requested features.
    #[must_use]
    pub fn features(&self) -> FeatureSet {
        self.features.features()
    }

    /// Returns the features enforced by this layer.
    #[must_use]
    pub fn local_features(&self) -> FeatureSet {
        self.features.local_features()
    }

    /// Returns `true` if `feature` is requested.
    #[must_use]
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.has(feature)
    }

    /// Requests a feature; see [`FeatureRegistry::request_feature`].
    pub fn request_feature(&mut self, feature: Feature) -> Result<bool, WindowError> {
        self.ensure_alive()?;
        Ok(self.features.request_feature(feature))
    }

    /// Requests a feature by numeric id; see [`FeatureRegistry::request`].
    pub fn request_feature_id(&mut self, id: i32) -> Result<bool, WindowError> {
        self.ensure_alive()?;
        Ok(self.features.request(id))
    }

    pub(crate) fn features_mut(&mut self) -> &mut FeatureRegistry {
        &mut self.features
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Returns the attributes as configured, without forced flags.
    #[must_use]
    pub fn attributes(&self) -> &AttributeRecord {
        self.attributes.attributes()
    }

    /// Returns the attribute state, including the explicitly-set markers.
    #[must_use]
    pub fn attribute_state(&self) -> &AttributeState {
        &self.attributes
    }

    /// Returns the attributes with forced flags applied.
    #[must_use]
    pub fn materialized_attributes(&self) -> AttributeRecord {
        self.attributes.materialize()
    }

    fn update_attributes(
        &mut self,
        update: impl FnOnce(&mut AttributeState),
    ) -> Result<(), WindowError> {
        self.ensure_alive()?;
        update(&mut self.attributes);
        self.dispatcher
            .window_attributes_changed(self.attributes.attributes());
        Ok(())
    }

    /// Replaces the whole attribute record.
    pub fn set_attributes(&mut self, attrs: AttributeRecord) -> Result<(), WindowError> {
        self.update_attributes(|state| state.replace(attrs))
    }

    /// Sets the window type.
    pub fn set_type(&mut self, window_type: WindowType) -> Result<(), WindowError> {
        self.update_attributes(|state| state.set_type(window_type))
    }

    /// Sets the title.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), WindowError> {
        let title = title.into();
        self.update_attributes(|state| state.set_title(title))
    }

    /// Sets the requested size.
    pub fn set_layout(&mut self, width: LayoutSize, height: LayoutSize) -> Result<(), WindowError> {
        self.update_attributes(|state| state.set_layout(width, height))
    }

    /// Replaces the flags selected by `mask`.
    pub fn set_flags(&mut self, flags: WindowFlags, mask: WindowFlags) -> Result<(), WindowError> {
        self.update_attributes(|state| state.set_flags(flags, mask))
    }

    /// Sets `flags`.
    pub fn add_flags(&mut self, flags: WindowFlags) -> Result<(), WindowError> {
        self.update_attributes(|state| state.add_flags(flags))
    }

    /// Clears `flags`. Forced flags still appear when materialized.
    pub fn clear_flags(&mut self, flags: WindowFlags) -> Result<(), WindowError> {
        self.update_attributes(|state| state.clear_flags(flags))
    }

    /// Sets the surface format; see [`AttributeState::set_format`].
    pub fn set_format(&mut self, format: PixelFormat) -> Result<(), WindowError> {
        self.update_attributes(|state| state.set_format(format))
    }

    /// Sets the format used when none was set explicitly.
    pub fn set_default_window_format(&mut self, format: PixelFormat) -> Result<(), WindowError> {
        self.update_attributes(|state| state.set_default_window_format(format))
    }

    /// Sets the dim amount, clamped to `0.0..=1.0`.
    pub fn set_dim_amount(&mut self, amount: f32) -> Result<(), WindowError> {
        self.update_attributes(|state| state.set_dim_amount(amount))
    }

    /// Sets the soft input mode.
    pub fn set_soft_input_mode(&mut self, mode: SoftInputMode) -> Result<(), WindowError> {
        self.update_attributes(|state| state.set_soft_input_mode(mode))
    }

    /// Applies the theme style to every attribute not set explicitly.
    pub fn apply_theme_defaults(&mut self) -> Result<(), WindowError> {
        self.ensure_alive()?;
        let style = self.style.call_once(|| self.context.resolve_window_style());
        self.attributes.apply_style_defaults(style);
        self.dispatcher
            .window_attributes_changed(self.attributes.attributes());
        Ok(())
    }

    /// Sets whether touching outside the window closes it.
    pub fn set_close_on_touch_outside(&mut self, close: bool) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.attributes.set_close_on_touch_outside(close);
        Ok(())
    }

    /// Sets close-on-touch-outside unless it was set explicitly before.
    pub fn set_close_on_touch_outside_if_not_set(
        &mut self,
        close: bool,
    ) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.attributes.set_close_on_touch_outside_if_not_set(close);
        Ok(())
    }

    /// Returns `true` if `event` should close the window.
    ///
    /// That is the case when close-on-touch-outside is enabled, a decor
    /// surface exists, and the event is either an outside event or a down
    /// event outside `bounds`.
    #[must_use]
    pub fn should_close_on_touch(&self, event: &MotionEvent, bounds: Rect) -> bool {
        if !self.attributes.close_on_touch_outside() || self.decor.is_none() {
            return false;
        }
        match event.action {
            MotionAction::Outside => true,
            MotionAction::Down => !bounds.contains(event.position),
            _ => false,
        }
    }

    /// Enables or disables closing the window with a swipe.
    pub fn set_close_on_swipe_enabled(&mut self, enabled: bool) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.close_on_swipe_enabled = enabled;
        Ok(())
    }

    /// Returns `true` if closing with a swipe is enabled.
    #[must_use]
    pub fn is_close_on_swipe_enabled(&self) -> bool {
        self.close_on_swipe_enabled
    }

    // =========================================================================
    // Identity and collaborators
    // =========================================================================

    /// Binds a window manager and the application identity.
    ///
    /// With `manager = None` the context's window manager is used. Binding
    /// does not show the window. When `hardware_accelerated` is set,
    /// [`WindowFlags::HARDWARE_ACCELERATED`] is forced on.
    pub fn set_window_manager(
        &mut self,
        manager: Option<Box<dyn WindowManager>>,
        app_token: Option<Token>,
        app_name: impl Into<String>,
        hardware_accelerated: bool,
    ) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.app_token = app_token;
        self.app_name = app_name.into();
        self.hardware_accelerated = hardware_accelerated;
        if hardware_accelerated {
            self.attributes
                .force_flags(WindowFlags::HARDWARE_ACCELERATED);
        }
        self.window_manager = manager.or_else(|| self.context.window_manager());
        if self.window_manager.is_none() {
            log::debug!("window bound to {:?} without a window manager", self.app_name);
        }
        Ok(())
    }

    /// Returns the bound window manager.
    #[must_use]
    pub fn window_manager(&self) -> Option<&dyn WindowManager> {
        self.window_manager.as_deref()
    }

    pub(crate) fn window_manager_mut(&mut self) -> Option<&mut (dyn WindowManager + 'static)> {
        self.window_manager.as_deref_mut()
    }

    /// Returns the application token.
    #[must_use]
    pub fn app_token(&self) -> Option<Token> {
        self.app_token
    }

    /// Returns the application name; empty if none was bound.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns `true` if the window was bound as hardware accelerated.
    #[must_use]
    pub fn is_hardware_accelerated(&self) -> bool {
        self.hardware_accelerated
    }

    /// Attaches or detaches the decor surface and returns the previous one.
    pub fn set_decor_surface(
        &mut self,
        decor: Option<Box<dyn DecorSurface>>,
    ) -> Result<Option<Box<dyn DecorSurface>>, WindowError> {
        self.ensure_alive()?;
        Ok(core::mem::replace(&mut self.decor, decor))
    }

    /// Returns the decor surface, if one is attached.
    #[must_use]
    pub fn peek_decor_surface(&self) -> Option<&dyn DecorSurface> {
        self.decor.as_deref()
    }

    /// Returns the decor surface's token.
    #[must_use]
    pub fn decor_token(&self) -> Option<Token> {
        self.decor.as_ref().and_then(|decor| decor.window_token())
    }

    /// Builds the derivation context for records owned by this window.
    ///
    /// `container` must be this window's container, if it has one.
    #[must_use]
    pub fn derivation_context<'a>(&'a self, container: Option<&Self>) -> DerivationContext<'a> {
        DerivationContext {
            app_name: &self.app_name,
            app_token: self.app_token,
            container: container.map(|c| ContainerIdentity {
                app_token: c.app_token,
            }),
            decor_token: self.decor_token(),
        }
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// Returns the container, or `None` for a top-level window.
    #[must_use]
    pub fn container(&self) -> Option<WindowId> {
        self.container
    }

    /// Returns `true` once any window set this one as its container.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.has_children
    }

    /// Returns the active child.
    #[must_use]
    pub fn active_child(&self) -> Option<WindowId> {
        self.active_child
    }

    /// Returns `true` if this window is the active child of its container.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Destroys the window.
    ///
    /// Returns `true` if this call destroyed it and `false` if it was already
    /// destroyed. Frame metrics listeners are released.
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        self.frame_metrics_listeners.clear();
        log::debug!("destroyed window {:?}", self.attributes.attributes().title);
        true
    }

    /// Returns `true` once the window was destroyed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // =========================================================================
    // Callback
    // =========================================================================

    /// Replaces the callback and returns the previous one.
    pub fn set_callback(
        &mut self,
        callback: Option<Box<dyn WindowCallback>>,
    ) -> Option<Box<dyn WindowCallback>> {
        self.dispatcher.set(callback)
    }

    /// Returns the callback.
    #[must_use]
    pub fn callback(&self) -> Option<&dyn WindowCallback> {
        self.dispatcher.get()
    }

    /// Returns the dispatcher the substrate forwards events through.
    pub fn dispatcher(&mut self) -> &mut CallbackDispatcher {
        &mut self.dispatcher
    }

    // =========================================================================
    // Auxiliary listeners
    // =========================================================================

    /// Sets the dismissal listener.
    pub fn set_on_window_dismissed_callback(
        &mut self,
        listener: Option<Box<dyn OnWindowDismissed>>,
    ) {
        self.on_dismissed = listener;
    }

    /// Notifies the dismissal listener.
    pub fn dispatch_on_window_dismissed(
        &mut self,
        finish_task: bool,
        suppress_window_transition: bool,
    ) {
        if let Some(listener) = self.on_dismissed.as_deref_mut() {
            listener.on_window_dismissed(finish_task, suppress_window_transition);
        }
    }

    /// Sets the swipe dismissal listener.
    pub fn set_on_window_swipe_dismissed_callback(
        &mut self,
        listener: Option<Box<dyn OnWindowSwipeDismissed>>,
    ) {
        self.on_swipe_dismissed = listener;
    }

    /// Notifies the swipe dismissal listener.
    pub fn dispatch_on_window_swipe_dismissed(&mut self) {
        if let Some(listener) = self.on_swipe_dismissed.as_deref_mut() {
            listener.on_window_swipe_dismissed();
        }
    }

    /// Sets the controller callback.
    pub fn set_window_controller_callback(
        &mut self,
        controller: Option<Box<dyn WindowControllerCallback>>,
    ) {
        self.controller = controller;
    }

    /// Returns the controller callback.
    pub fn window_controller_callback(
        &mut self,
    ) -> Option<&mut (dyn WindowControllerCallback + 'static)> {
        self.controller.as_deref_mut()
    }

    /// Sets the decor callback.
    pub fn set_decor_callback(&mut self, callback: Option<Box<dyn DecorCallback>>) {
        self.decor_callback = callback;
    }

    /// Records a new system bar appearance and notifies the decor callback.
    pub fn dispatch_on_system_bar_appearance_changed(&mut self, appearance: SystemBarAppearance) {
        self.system_bar_appearance = appearance;
        if let Some(callback) = self.decor_callback.as_deref_mut() {
            callback.on_system_bar_appearance_changed(appearance);
        }
    }

    /// Returns the last system bar appearance.
    #[must_use]
    pub fn system_bar_appearance(&self) -> SystemBarAppearance {
        self.system_bar_appearance
    }

    /// Asks the decor callback whether it draws the legacy navigation bar
    /// background.
    ///
    /// Returns `false`, leaving it to the decor, when no decor callback is set.
    pub fn on_draw_legacy_navigation_bar_background_changed(&mut self, draw: bool) -> bool {
        self.decor_callback
            .as_deref_mut()
            .is_some_and(|callback| callback.on_draw_legacy_navigation_bar_background_changed(draw))
    }

    /// Sets the restricted caption area listener.
    ///
    /// Setting a listener resets the stored area to an empty rectangle;
    /// clearing it drops the area.
    pub fn set_restricted_caption_area_listener(
        &mut self,
        listener: Option<Box<dyn OnRestrictedCaptionAreaChanged>>,
    ) {
        self.restricted_caption_area = listener.as_ref().map(|_| Rect::ZERO);
        self.caption_area_listener = listener;
    }

    /// Stores `area` and forwards it to the listener.
    ///
    /// Does nothing without a listener.
    pub fn notify_restricted_caption_area(&mut self, area: Rect) {
        if let Some(listener) = self.caption_area_listener.as_deref_mut() {
            self.restricted_caption_area = Some(area);
            listener.on_restricted_caption_area_changed(area);
        }
    }

    /// Returns the stored caption area.
    #[must_use]
    pub fn restricted_caption_area(&self) -> Option<Rect> {
        self.restricted_caption_area
    }

    /// Registers a frame metrics listener.
    ///
    /// Requires an attached decor surface.
    pub fn add_on_frame_metrics_available_listener(
        &mut self,
        listener: Box<dyn OnFrameMetricsAvailable>,
    ) -> Result<FrameMetricsListenerId, WindowError> {
        self.ensure_alive()?;
        if self.decor.is_none() {
            return Err(WindowError::NoDecorSurface);
        }
        let id = FrameMetricsListenerId(self.next_frame_metrics_id);
        self.next_frame_metrics_id = self.next_frame_metrics_id.wrapping_add(1);
        self.frame_metrics_listeners.push((id, listener));
        Ok(id)
    }

    /// Removes a frame metrics listener.
    ///
    /// Returns `true` if `id` was registered.
    pub fn remove_on_frame_metrics_available_listener(
        &mut self,
        id: FrameMetricsListenerId,
    ) -> bool {
        let before = self.frame_metrics_listeners.len();
        self.frame_metrics_listeners
            .retain(|(registered, _)| *registered != id);
        self.frame_metrics_listeners.len() != before
    }

    /// Delivers one frame's metrics to every frame metrics listener.
    pub fn dispatch_frame_metrics(&mut self, metrics: &FrameMetrics, dropped_reports: u32) {
        for (_, listener) in &mut self.frame_metrics_listeners {
            listener.on_frame_metrics_available(metrics, dropped_reports);
        }
    }

    // =========================================================================
    // Decor caption
    // =========================================================================

    /// Sets whether content may be drawn under the decor caption.
    pub fn set_overlay_with_decor_caption_enabled(
        &mut self,
        enabled: bool,
    ) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.overlay_with_decor_caption_enabled = enabled;
        Ok(())
    }

    /// Returns `true` if content may be drawn under the decor caption.
    #[must_use]
    pub fn is_overlay_with_decor_caption_enabled(&self) -> bool {
        self.overlay_with_decor_caption_enabled
    }

    /// Sets the caption control shade.
    pub fn set_decor_caption_shade(&mut self, shade: DecorCaptionShade) -> Result<(), WindowError> {
        self.ensure_alive()?;
        self.decor_caption_shade = shade;
        Ok(())
    }

    /// Returns the caption control shade.
    #[must_use]
    pub fn decor_caption_shade(&self) -> DecorCaptionShade {
        self.decor_caption_shade
    }
}

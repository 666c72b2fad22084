use gpui::{
    AppContext, Context, Entity, EventEmitter, IntoElement, Render, SharedString, Styled,
    Subscription, Window,
};
use gpui_component::{
    IndexPath,
    select::{Select, SelectEvent, SelectItem, SelectState},
};
use ticketbell_bridge::enums::{ClosedEnum, MetadataTable, display_name, lookup};

#[derive(Debug, Clone)]
struct EnumOption<T> {
    title: SharedString,
    value: T,
}

impl<T: ClosedEnum> SelectItem for EnumOption<T> {
    type Value = T;

    fn title(&self) -> SharedString {
        self.title.clone()
    }

    fn value(&self) -> &Self::Value {
        &self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumSelectEvent<T> {
    /// The user picked a value. `None` when the selection was cleared.
    Change(Option<T>),
}

/// Dropdown over the members of `T` holding a single selected value.
///
/// User picks are reported as [`EnumSelectEvent::Change`]. Owners push
/// external changes back with [`EnumSelect::set_value`], which never emits.
pub struct EnumSelect<T: ClosedEnum> {
    state: Entity<SelectState<Vec<EnumOption<T>>>>,
    value: Option<T>,
    placeholder: SharedString,
    _subscription: Subscription,
}

impl<T: ClosedEnum> EnumSelect<T> {
    pub fn new(
        value: Option<T>,
        metadata: Option<&'static MetadataTable<T>>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let options: Vec<EnumOption<T>> = T::MEMBERS
            .iter()
            .map(|member| EnumOption {
                title: metadata
                    .and_then(|table| lookup(table, *member))
                    .map(|entry| entry.display_name.to_string())
                    .unwrap_or_else(|| display_name::<T>(member.name()))
                    .into(),
                value: *member,
            })
            .collect();

        let selected_index = value.and_then(Self::index_of).map(IndexPath::new);
        let state = cx.new(|cx| SelectState::new(options, selected_index, window, cx));

        let _subscription = cx.subscribe_in(&state, window, |this, _, event, _, cx| match event {
            SelectEvent::Confirm(value) => {
                this.value = *value;
                cx.emit(EnumSelectEvent::Change(*value));
                cx.notify();
            }
        });

        Self {
            state,
            value,
            placeholder: "Select...".into(),
            _subscription,
        }
    }

    fn index_of(value: T) -> Option<usize> {
        T::MEMBERS.iter().position(|member| *member == value)
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> Option<T> {
        self.value
    }

    /// Replaces the selection without emitting a change event.
    pub fn set_value(&mut self, value: Option<T>, window: &mut Window, cx: &mut Context<Self>) {
        if self.value == value {
            return;
        }

        self.value = value;
        let index = value.and_then(Self::index_of).map(IndexPath::new);
        self.state.update(cx, |state, cx| {
            state.set_selected_index(index, window, cx);
        });
        cx.notify();
    }
}

impl<T: ClosedEnum> EventEmitter<EnumSelectEvent<T>> for EnumSelect<T> {}

impl<T: ClosedEnum> Render for EnumSelect<T> {
    fn render(&mut self, _: &mut Window, _: &mut Context<Self>) -> impl IntoElement {
        Select::new(&self.state)
            .min_w_48()
            .placeholder(self.placeholder.clone())
    }
}

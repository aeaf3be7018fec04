use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type SubId = usize;

type Listener<T> = Rc<dyn Fn(&T)>;

/// Shared, observable cell. Cloning yields another handle to the same value,
/// which is how a measured quantity is handed to a collaborator that must
/// re-read it later (e.g. a trigger range that follows the content width).
#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Slot<T>>>);

struct Slot<T> {
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T: Clone + PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Slot {
            value,
            listeners: Vec::new(),
        })))
    }

    pub fn get(&self) -> T {
        self.0.borrow().value.clone()
    }

    /// Store `value`, notifying listeners only when it differs. Listeners
    /// run after the borrow is released and may read the signal.
    pub fn set(&self, value: T) -> bool {
        let listeners = {
            let mut slot = self.0.borrow_mut();
            if slot.value == value {
                return false;
            }
            slot.value = value.clone();
            slot.listeners.clone()
        };
        for listener in listeners {
            listener(&value);
        }
        true
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut slot = self.0.borrow_mut();
        slot.listeners.push(Rc::new(f));
        slot.listeners.len() - 1
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signal").field(&self.0.borrow().value).finish()
    }
}

pub fn signal<T: Clone + PartialEq>(t: T) -> Signal<T> {
    Signal::new(t)
}

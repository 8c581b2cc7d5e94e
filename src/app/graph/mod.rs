mod interaction;
mod satellite;
mod view;

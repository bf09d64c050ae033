mod owner_actor;

pub use owner_actor::OwnerActor;

use std::collections::HashMap;
use std::rc::Rc;

use uuid::Uuid;

use crate::error::SceneError;
use crate::mask::{Mask, MaskBinding, MaskFrame};
use crate::scene::{NodeId, Object2D, Scene};

use super::data::{MaskData, NodeData, NodeFlags};
use super::registry::TypeRegistry;

impl Scene {
    /// Captures `id` (and, when `recursive`, its whole subtree) as plain data.
    ///
    /// Mask frames pointing at other nodes are stored by uuid. A binding
    /// whose frame node no longer exists is left out.
    pub fn serialize(&self, id: NodeId, recursive: bool) -> Result<NodeData, SceneError> {
        let node = self.get(id).ok_or(SceneError::UnknownNode(id))?;

        let mut masks = Vec::with_capacity(node.masks.len());
        for binding in &node.masks {
            let frame = match binding.frame {
                MaskFrame::Owner => None,
                MaskFrame::Node(frame) => match self.get(frame) {
                    Some(n) => Some(n.uuid()),
                    None => {
                        log::debug!("skipping mask on {id}: frame {frame} is gone");
                        continue;
                    }
                },
            };
            masks.push(MaskData {
                type_name: binding.mask.type_name().to_string(),
                mask: binding.mask.to_value()?,
                frame,
            });
        }

        let children = if recursive {
            node.children()
                .iter()
                .map(|&child| self.serialize(child, true))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };

        Ok(NodeData {
            uuid: node.uuid(),
            type_name: node.shape.as_ref().map(|s| s.type_name().to_string()),
            shape: match &node.shape {
                Some(shape) => shape.to_value()?,
                None => serde_json::Value::Null,
            },
            position: node.position(),
            origin: node.origin(),
            scale: node.scale(),
            rotation: node.rotation(),
            layer: node.layer,
            flags: NodeFlags {
                visible: node.visible,
                pointer_events: node.pointer_events,
                draggable: node.draggable,
                ignore_viewport: node.ignore_viewport,
                save_context_state: node.save_context_state,
                restore_context_state: node.restore_context_state,
            },
            masks,
            children,
        })
    }

    /// Recreates a subtree from `data` and attaches it under `parent`.
    ///
    /// Uuids are kept. Mask frames are resolved once the whole subtree
    /// exists; a frame uuid not found in the subtree or the rest of the
    /// scene is an error. On error nothing stays attached.
    pub fn parse(
        &mut self,
        data: &NodeData,
        parent: NodeId,
        registry: &TypeRegistry,
    ) -> Result<NodeId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownNode(parent));
        }

        let mut created = HashMap::new();
        let mut pending = Vec::new();
        let top = match self.build_subtree(data, registry, &mut created, &mut pending) {
            Ok(top) => top,
            Err(err) => {
                self.discard(created.values().copied());
                return Err(err);
            }
        };

        for (owner, mask, frame_uuid) in pending {
            let frame = created
                .get(&frame_uuid)
                .copied()
                .or_else(|| self.find_by_uuid(self.root(), frame_uuid));
            let Some(frame) = frame else {
                self.discard(created.values().copied());
                return Err(SceneError::UnknownMaskFrame(frame_uuid));
            };
            self[owner].masks.push(MaskBinding::in_frame(mask, frame));
        }

        self.attach(parent, top)?;
        log::debug!("parsed {} node(s) under {parent}", created.len());
        Ok(top)
    }

    /// Builds `data` as a standalone subtree. Masks with a foreign frame are
    /// queued in `pending` since their frame may not exist yet.
    fn build_subtree(
        &mut self,
        data: &NodeData,
        registry: &TypeRegistry,
        created: &mut HashMap<Uuid, NodeId>,
        pending: &mut Vec<(NodeId, Rc<dyn Mask>, Uuid)>,
    ) -> Result<NodeId, SceneError> {
        let mut node = Object2D::new()
            .with_position(data.position)
            .with_origin(data.origin)
            .with_scale(data.scale)
            .with_rotation(data.rotation)
            .with_layer(data.layer)
            .visible(data.flags.visible)
            .pointer_events(data.flags.pointer_events)
            .draggable(data.flags.draggable)
            .ignore_viewport(data.flags.ignore_viewport);
        node.save_context_state = data.flags.save_context_state;
        node.restore_context_state = data.flags.restore_context_state;
        node.set_uuid(data.uuid);

        if let Some(name) = &data.type_name {
            node.shape = Some(registry.build_shape(name, &data.shape)?);
        }

        let mut foreign = Vec::new();
        for mask_data in &data.masks {
            let mask = registry.build_mask(&mask_data.type_name, &mask_data.mask)?;
            match mask_data.frame {
                None => node.masks.push(MaskBinding::owner(mask)),
                Some(frame) => foreign.push((mask, frame)),
            }
        }

        let id = self.insert(node);
        created.insert(data.uuid, id);
        pending.extend(foreign.into_iter().map(|(mask, frame)| (id, mask, frame)));

        for child in &data.children {
            let child_id = self.build_subtree(child, registry, created, pending)?;
            self.attach(id, child_id)?;
        }
        Ok(id)
    }

    fn discard(&mut self, ids: impl Iterator<Item = NodeId>) {
        let ids: Vec<_> = ids.collect();
        for id in ids {
            self.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Box2, Vector2};
    use crate::mask::BoxMask;
    use crate::persist::{from_json, to_json};
    use crate::scene::shapes::{BoxShape, CircleShape};

    fn sample(scene: &mut Scene) -> NodeId {
        let group = scene
            .add(
                scene.root(),
                Object2D::new()
                    .with_position(Vector2::new(10.0, 20.0))
                    .with_rotation(0.25)
                    .with_layer(3)
                    .with_mask(Rc::new(BoxMask::new(Box2::new(
                        Vector2::zero(),
                        Vector2::new(50.0, 50.0),
                    )))),
            )
            .unwrap();
        let frame = scene
            .add(group, Object2D::new().with_shape(BoxShape::centered(4.0, 2.0)).draggable(true))
            .unwrap();
        let leaf = scene
            .add(
                group,
                Object2D::new()
                    .with_shape(CircleShape::new(6.0))
                    .with_scale(Vector2::new(2.0, 1.0))
                    .pointer_events(false),
            )
            .unwrap();
        scene[leaf].masks.push(MaskBinding::in_frame(
            Rc::new(BoxMask::new(Box2::new(Vector2::zero(), Vector2::one())).inverted()),
            frame,
        ));
        group
    }

    #[test]
    fn round_trip_reproduces_subtree() {
        let mut scene = Scene::new();
        let group = sample(&mut scene);
        let data = scene.serialize(group, true).unwrap();

        let mut copy = Scene::new();
        let parsed = copy
            .parse(&data, copy.root(), &TypeRegistry::with_defaults())
            .unwrap();

        assert_eq!(copy.serialize(parsed, true).unwrap(), data);
        assert_eq!(copy[parsed].uuid(), scene[group].uuid());
        assert_eq!(copy.children(parsed).len(), 2);
        assert_eq!(copy[parsed].layer, 3);

        let leaf = copy.children(parsed)[1];
        assert!(!copy[leaf].pointer_events);
        match copy[leaf].masks[0].frame {
            MaskFrame::Node(frame) => assert_eq!(frame, copy.children(parsed)[0]),
            MaskFrame::Owner => panic!("frame lost"),
        }
    }

    #[test]
    fn json_round_trip() {
        let mut scene = Scene::new();
        let group = sample(&mut scene);
        let data = scene.serialize(group, true).unwrap();
        let text = to_json(&data).unwrap();
        assert_eq!(from_json(&text).unwrap(), data);
    }

    #[test]
    fn non_recursive_skips_children() {
        let mut scene = Scene::new();
        let group = sample(&mut scene);
        assert!(scene.serialize(group, false).unwrap().children.is_empty());
    }

    #[test]
    fn unknown_type_leaves_scene_untouched() {
        let mut scene = Scene::new();
        let group = sample(&mut scene);
        let data = scene.serialize(group, true).unwrap();

        let mut copy = Scene::new();
        let err = copy.parse(&data, copy.root(), &TypeRegistry::new()).unwrap_err();
        assert!(matches!(err, SceneError::UnknownType(_)));
        assert_eq!(copy.len(), 1);
    }

    #[test]
    fn mask_with_removed_frame_is_dropped() {
        let mut scene = Scene::new();
        let group = sample(&mut scene);
        let frame = scene.children(group)[0];
        let leaf = scene.children(group)[1];
        scene.remove(frame);
        scene.update_transforms();

        // Inside the inverted unit box in the leaf's own frame.
        let point = Vector2::new(10.5, 20.5);
        assert!(crate::mask::accepts(&scene, leaf, point, false));

        let data = scene.serialize(leaf, false).unwrap();
        assert!(data.masks.is_empty());

        let mut copy = Scene::new();
        let parsed = copy.parse(&data, copy.root(), &TypeRegistry::with_defaults()).unwrap();
        copy.update_transforms();
        assert!(copy[parsed].masks.is_empty());
        // The copy sits at the origin; this point is inside the unit box
        // in its frame, where an owner-frame mask would reject it.
        assert!(crate::mask::accepts(&copy, parsed, Vector2::new(0.5, 0.5), false));
    }

    #[test]
    fn dangling_mask_frame_is_an_error() {
        let mut scene = Scene::new();
        let group = sample(&mut scene);
        let mut data = scene.serialize(group, true).unwrap();
        data.children.remove(0);

        let mut copy = Scene::new();
        let err = copy
            .parse(&data, copy.root(), &TypeRegistry::with_defaults())
            .unwrap_err();
        assert!(matches!(err, SceneError::UnknownMaskFrame(_)));
        assert_eq!(copy.len(), 1);
    }
}

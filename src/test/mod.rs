mod binary_tree_routing;
mod fat_tree_routing;
mod walk;

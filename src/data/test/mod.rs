mod item;
